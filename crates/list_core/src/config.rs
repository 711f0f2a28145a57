use shared::{
    protocol::SortDirection,
    record::{FieldKey, IdScheme},
};

/// Static per-collection settings a controller is built with.
#[derive(Debug, Clone)]
pub struct ListConfig<F: FieldKey> {
    pub page_size: usize,
    pub searchable_fields: Vec<F>,
    pub required_fields: Vec<F>,
    pub id_scheme: IdScheme,
    pub default_sort: Option<(F, SortDirection)>,
}

impl<F: FieldKey> ListConfig<F> {
    pub fn new(page_size: usize, id_scheme: IdScheme) -> Self {
        Self {
            page_size: page_size.max(1),
            searchable_fields: Vec::new(),
            required_fields: Vec::new(),
            id_scheme,
            default_sort: None,
        }
    }

    pub fn searchable(mut self, fields: &[F]) -> Self {
        self.searchable_fields = fields.to_vec();
        self
    }

    pub fn required(mut self, fields: &[F]) -> Self {
        self.required_fields = fields.to_vec();
        self
    }

    pub fn sorted_by(mut self, field: F, direction: SortDirection) -> Self {
        self.default_sort = Some((field, direction));
        self
    }
}
