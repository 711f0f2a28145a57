//! Ordering and matching shared by every list.

use std::cmp::Ordering;

use chrono::NaiveTime;
use shared::{
    protocol::SortDirection,
    record::{FieldSource, FieldValue},
};

/// Total order over field values. Values of the same kind compare
/// naturally (text by code point, numbers numerically, dates by instant);
/// mixed kinds fall back to a fixed rank with `Empty` first.
pub fn compare_values(left: &FieldValue<'_>, right: &FieldValue<'_>) -> Ordering {
    match (left, right) {
        (FieldValue::Text(a), FieldValue::Text(b)) => a.as_ref().cmp(b.as_ref()),
        (FieldValue::Number(a), FieldValue::Number(b)) => a.total_cmp(b),
        (FieldValue::Date(a), FieldValue::Date(b)) => a.cmp(b),
        (FieldValue::DateTime(a), FieldValue::DateTime(b)) => a.cmp(b),
        (FieldValue::Date(a), FieldValue::DateTime(b)) => a.and_time(NaiveTime::MIN).cmp(b),
        (FieldValue::DateTime(a), FieldValue::Date(b)) => a.cmp(&b.and_time(NaiveTime::MIN)),
        _ => rank(left).cmp(&rank(right)),
    }
}

fn rank(value: &FieldValue<'_>) -> u8 {
    match value {
        FieldValue::Empty => 0,
        FieldValue::Number(_) => 1,
        FieldValue::Date(_) | FieldValue::DateTime(_) => 2,
        FieldValue::Text(_) => 3,
    }
}

pub fn compare_by<R: FieldSource>(
    left: &R,
    right: &R,
    field: R::Field,
    direction: SortDirection,
) -> Ordering {
    let a = left.field(field).unwrap_or(FieldValue::Empty);
    let b = right.field(field).unwrap_or(FieldValue::Empty);
    let ordering = compare_values(&a, &b);
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// Stable sort: records with equal keys keep their relative order in both
/// directions.
pub fn sort_records<R: FieldSource>(records: &mut [&R], field: R::Field, direction: SortDirection) {
    records.sort_by(|a, b| compare_by(*a, *b, field, direction));
}

/// Case-insensitive substring match against any of `fields`. An empty
/// needle matches everything.
pub fn matches_search<R: FieldSource>(record: &R, needle: &str, fields: &[R::Field]) -> bool {
    let needle = needle.to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields.iter().any(|field| {
        record
            .field(*field)
            .is_some_and(|value| value.search_text().to_lowercase().contains(&needle))
    })
}

#[cfg(test)]
#[path = "tests/compare_tests.rs"]
mod tests;
