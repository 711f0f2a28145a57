//! Field-level contract every managed record type implements.
//!
//! The list controller never looks at concrete record structs; it reads
//! fields through [`FieldSource`] and builds or patches records through
//! [`Record`].

use std::{borrow::Cow, fmt, hash::Hash};

use chrono::{NaiveDate, NaiveDateTime};

/// Closed set of column names for one record type.
pub trait FieldKey: Copy + Eq + Hash + fmt::Debug + 'static {
    const ALL: &'static [Self];

    fn name(self) -> &'static str;

    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.name().eq_ignore_ascii_case(raw))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Empty,
    Text(Cow<'a, str>),
    Number(f64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl<'a> FieldValue<'a> {
    pub fn text(value: &'a str) -> Self {
        FieldValue::Text(Cow::Borrowed(value))
    }

    pub fn number(value: impl Into<f64>) -> Self {
        FieldValue::Number(value.into())
    }

    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Empty => true,
            FieldValue::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    /// Text used for substring search.
    pub fn search_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Empty => Cow::Borrowed(""),
            FieldValue::Text(text) => Cow::Borrowed(text.as_ref()),
            FieldValue::Number(n) => Cow::Owned(n.to_string()),
            FieldValue::Date(d) => Cow::Owned(d.format("%Y-%m-%d").to_string()),
            FieldValue::DateTime(dt) => Cow::Owned(dt.format("%Y-%m-%d %H:%M").to_string()),
        }
    }
}

impl<'a, T> From<Option<T>> for FieldValue<'a>
where
    T: Into<FieldValue<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Empty, Into::into)
    }
}

impl From<NaiveDate> for FieldValue<'_> {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

impl From<NaiveDateTime> for FieldValue<'_> {
    fn from(value: NaiveDateTime) -> Self {
        FieldValue::DateTime(value)
    }
}

/// Anything fields can be read from: a stored record, a create draft or an
/// update patch. Drafts and patches return `None` for fields they do not set.
pub trait FieldSource {
    type Field: FieldKey;

    fn field(&self, field: Self::Field) -> Option<FieldValue<'_>>;
}

/// How new ids are minted for a collection: `prefix` followed by the
/// sequence number zero-padded to `width` digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdScheme {
    pub prefix: &'static str,
    pub width: usize,
    pub first: u64,
}

impl IdScheme {
    pub const fn new(prefix: &'static str, width: usize, first: u64) -> Self {
        Self {
            prefix,
            width,
            first,
        }
    }

    pub fn format(&self, sequence: u64) -> String {
        format!("{}{:0width$}", self.prefix, sequence, width = self.width)
    }

    pub fn sequence_of(&self, raw: &str) -> Option<u64> {
        raw.strip_prefix(self.prefix)?.parse().ok()
    }
}

pub trait SequentialId: Clone + Eq + fmt::Debug + fmt::Display {
    fn from_sequence(scheme: &IdScheme, sequence: u64) -> Self;

    /// Sequence number this id occupies under `scheme`, if it follows it.
    fn sequence(&self, scheme: &IdScheme) -> Option<u64>;

    fn parse(raw: &str) -> Option<Self>;
}

pub trait Record: FieldSource + Clone {
    type Id: SequentialId;
    type Draft: FieldSource<Field = Self::Field>;
    type Patch: FieldSource<Field = Self::Field>;

    fn id(&self) -> &Self::Id;

    /// Id chosen by the caller on the create form, when the collection
    /// lets users pick one.
    fn explicit_id(_draft: &Self::Draft) -> Option<Self::Id> {
        None
    }

    fn from_draft(id: Self::Id, draft: Self::Draft) -> Self;

    fn apply(&mut self, patch: Self::Patch);
}
