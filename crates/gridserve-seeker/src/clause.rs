//! Predicate evaluation.
//!
//! A [`FieldFilter`] is matched against the [`Value`] a record reports for the
//! filter's field; groups combine their members by relation:
//!
//! ```text
//! and group = every member matches   (empty = trivially satisfied)
//! or group  = some member matches    (empty = trivially satisfied)
//! ```
//!
//! Numeric variants compare across widths. `like` is a case-insensitive
//! substring test on strings. An absent value never matches.

use std::cmp::Ordering;

use gridserve::{FieldFilter, FieldValue, Filter, FilterOp, Group, Record, Relation, Value};

/// Evaluates a single predicate against a field value.
///
/// Returns `false` on a type mismatch, for `NaN`, and for [`Value::None`].
pub fn field_matches(filter: &FieldFilter, field: &Value<'_>) -> bool {
    if filter.op == FilterOp::Like {
        return match (field, &filter.value) {
            (Value::String(s), FieldValue::String(pattern)) => like(s, pattern),
            _ => false,
        };
    }
    match compare(field, &filter.value.as_value()) {
        Some(ordering) => filter.op.eval_ordering(ordering),
        None => false,
    }
}

/// Evaluates a filter tree node against a record.
pub fn filter_matches<R: Record>(filter: &Filter, record: &R) -> bool {
    match filter {
        Filter::Field(field) => field_matches(field, &record.field_value(&field.field)),
        Filter::Group(group) => group_matches(group, record),
    }
}

/// Evaluates a group against a record.
pub fn group_matches<R: Record>(group: &Group, record: &R) -> bool {
    if group.is_empty() {
        return true;
    }
    let mut members = group.filters().iter();
    match group.relation() {
        Relation::And => members.all(|filter| filter_matches(filter, record)),
        Relation::Or => members.any(|filter| filter_matches(filter, record)),
    }
}

fn like(field: &str, pattern: &str) -> bool {
    field.to_lowercase().contains(&pattern.to_lowercase())
}

/// Orders a field value against a predicate value of a compatible type.
fn compare(field: &Value<'_>, clause: &Value<'_>) -> Option<Ordering> {
    match (field, clause) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
        (a, b) if a.is_number() && b.is_number() => a.as_f64()?.partial_cmp(&b.as_f64()?),
        _ => None,
    }
}
