//! Search, sort, paginate and mutate an in-memory record collection.
//!
//! A [`ListController`] exclusively owns one collection. Rendering goes
//! through [`ListController::view`], which recomputes
//! `records -> filter -> sort -> page slice` on every call and never
//! mutates state.

pub mod compare;
pub mod config;
pub mod error;

pub use config::ListConfig;
pub use error::ListError;

use shared::{
    protocol::{Page, SortDirection, SortIndicator},
    record::{FieldKey, FieldSource, Record, SequentialId},
};
use tracing::{debug, warn};

pub struct ListController<R: Record> {
    config: ListConfig<R::Field>,
    records: Vec<R>,
    search_term: String,
    search_fields: Vec<R::Field>,
    sort: Option<(R::Field, SortDirection)>,
    page: usize,
    pending_delete: Option<R::Id>,
    next_sequence: u64,
}

impl<R: Record> ListController<R> {
    pub fn new(config: ListConfig<R::Field>) -> Self {
        Self::with_records(config, Vec::new())
    }

    pub fn with_records(config: ListConfig<R::Field>, records: Vec<R>) -> Self {
        let scheme = config.id_scheme;
        let next_sequence = records
            .iter()
            .filter_map(|record| record.id().sequence(&scheme))
            .max()
            .map_or(scheme.first, |highest| {
                highest.saturating_add(1).max(scheme.first)
            });

        Self {
            search_fields: config.searchable_fields.clone(),
            sort: config.default_sort,
            config,
            records,
            search_term: String::new(),
            page: 1,
            pending_delete: None,
            next_sequence,
        }
    }

    pub fn config(&self) -> &ListConfig<R::Field> {
        &self.config
    }

    /// All records in insertion order, ignoring search and paging.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &R::Id) -> Option<&R> {
        self.position(id).map(|index| &self.records[index])
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn search_fields(&self) -> &[R::Field] {
        &self.search_fields
    }

    pub fn sort(&self) -> Option<(R::Field, SortDirection)> {
        self.sort
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    pub fn pending_delete(&self) -> Option<&R::Id> {
        self.pending_delete.as_ref()
    }

    /// Searches the collection's configured columns. Resets to page 1.
    pub fn set_search(&mut self, term: impl Into<String>) {
        let fields = self.config.searchable_fields.clone();
        self.set_search_in(term, fields);
    }

    /// Searches the given columns instead of the configured ones. An empty
    /// column list falls back to the configured columns. Resets to page 1.
    pub fn set_search_in(&mut self, term: impl Into<String>, fields: Vec<R::Field>) {
        self.search_term = term.into();
        self.search_fields = if fields.is_empty() {
            self.config.searchable_fields.clone()
        } else {
            fields
        };
        self.page = 1;
    }

    /// Sorts by `key`, toggling the direction when `key` is already active.
    pub fn set_sort(&mut self, key: R::Field) -> SortDirection {
        let direction = match self.sort {
            Some((current, direction)) if current == key => direction.toggled(),
            _ => SortDirection::Asc,
        };
        self.sort = Some((key, direction));
        direction
    }

    /// Moves to page `page`, clamped into range. Returns the page shown.
    pub fn set_page(&mut self, page: usize) -> usize {
        self.page = page.clamp(1, self.total_pages());
        self.page
    }

    pub fn filtered_count(&self) -> usize {
        self.records
            .iter()
            .filter(|record| self.matches(record))
            .count()
    }

    pub fn total_pages(&self) -> usize {
        pages_for(self.filtered_count(), self.config.page_size)
    }

    pub fn create(&mut self, draft: R::Draft) -> Result<R::Id, ListError> {
        let missing = self.missing_fields(&draft, true);
        if !missing.is_empty() {
            debug!(fields = ?missing, "create rejected");
            return Err(ListError::MissingFields { fields: missing });
        }

        let id = match R::explicit_id(&draft) {
            Some(id) => {
                if self.id_taken(&id) {
                    return Err(ListError::DuplicateId(id.to_string()));
                }
                if let Some(sequence) = id.sequence(&self.config.id_scheme) {
                    let next = sequence
                        .checked_add(1)
                        .ok_or_else(|| ListError::IdOutOfRange(id.to_string()))?;
                    self.next_sequence = self.next_sequence.max(next);
                }
                id
            }
            None => self.allocate_id()?,
        };

        self.records.push(R::from_draft(id.clone(), draft));
        debug!(%id, total = self.records.len(), "record created");
        Ok(id)
    }

    /// Merges the fields set in `patch`. Required columns may not be blanked.
    pub fn update(&mut self, id: &R::Id, patch: R::Patch) -> Result<&R, ListError> {
        let index = self.index_of(id)?;
        let missing = self.missing_fields(&patch, false);
        if !missing.is_empty() {
            debug!(%id, fields = ?missing, "update rejected");
            return Err(ListError::MissingFields { fields: missing });
        }

        self.records[index].apply(patch);
        self.clamp_page();
        debug!(%id, "record updated");
        Ok(&self.records[index])
    }

    /// Runs a domain mutation against one record in place. The closure must
    /// not change the record's id.
    pub fn modify<T>(&mut self, id: &R::Id, f: impl FnOnce(&mut R) -> T) -> Result<T, ListError> {
        let index = self.index_of(id)?;
        let out = f(&mut self.records[index]);
        self.clamp_page();
        Ok(out)
    }

    /// First phase of a delete: remembers the target, removes nothing.
    pub fn request_delete(&mut self, id: &R::Id) -> Result<(), ListError> {
        self.index_of(id)?;
        self.pending_delete = Some(id.clone());
        Ok(())
    }

    /// Removes the pending target. Does nothing when no delete is pending.
    pub fn confirm_delete(&mut self) -> Result<Option<R>, ListError> {
        let Some(id) = self.pending_delete.take() else {
            return Ok(None);
        };
        let index = self.index_of(&id)?;
        let removed = self.records.remove(index);
        self.clamp_page();
        debug!(%id, remaining = self.records.len(), "record deleted");
        Ok(Some(removed))
    }

    pub fn cancel_delete(&mut self) -> Option<R::Id> {
        self.pending_delete.take()
    }

    pub fn view(&self) -> Page<&R> {
        let mut rows: Vec<&R> = self
            .records
            .iter()
            .filter(|record| self.matches(record))
            .collect();
        if let Some((field, direction)) = self.sort {
            compare::sort_records(&mut rows, field, direction);
        }

        let page_size = self.config.page_size;
        let total_records = rows.len();
        let total_pages = pages_for(total_records, page_size);
        let current_page = self.page.clamp(1, total_pages);
        let rows = rows
            .into_iter()
            .skip((current_page - 1) * page_size)
            .take(page_size)
            .collect();

        Page {
            rows,
            current_page,
            total_pages,
            total_records,
            page_size,
            sort: self.sort.map(|(field, direction)| SortIndicator {
                key: field.name().to_string(),
                direction,
            }),
        }
    }

    fn matches(&self, record: &R) -> bool {
        compare::matches_search(record, &self.search_term, &self.search_fields)
    }

    fn clamp_page(&mut self) {
        self.page = self.page.clamp(1, self.total_pages());
    }

    fn missing_fields<S>(&self, source: &S, absent_is_missing: bool) -> Vec<&'static str>
    where
        S: FieldSource<Field = R::Field>,
    {
        self.config
            .required_fields
            .iter()
            .copied()
            .filter(|field| match source.field(*field) {
                Some(value) => value.is_blank(),
                None => absent_is_missing,
            })
            .map(|field| field.name())
            .collect()
    }

    fn allocate_id(&mut self) -> Result<R::Id, ListError> {
        loop {
            let candidate =
                <R::Id as SequentialId>::from_sequence(&self.config.id_scheme, self.next_sequence);
            self.next_sequence = self
                .next_sequence
                .checked_add(1)
                .ok_or_else(|| ListError::IdOutOfRange(candidate.to_string()))?;
            if !self.id_taken(&candidate) {
                return Ok(candidate);
            }
        }
    }

    fn position(&self, id: &R::Id) -> Option<usize> {
        self.records.iter().position(|record| record.id() == id)
    }

    /// Ids are unique ignoring ASCII case.
    fn id_taken(&self, id: &R::Id) -> bool {
        let wanted = id.to_string();
        self.records
            .iter()
            .any(|record| record.id().to_string().eq_ignore_ascii_case(&wanted))
    }

    fn index_of(&self, id: &R::Id) -> Result<usize, ListError> {
        self.position(id).ok_or_else(|| {
            warn!(%id, "record not found");
            ListError::NotFound(id.to_string())
        })
    }
}

fn pages_for(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
