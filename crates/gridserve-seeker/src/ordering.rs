//! Result ordering.

use std::cmp::Ordering;

use gridserve::{Dir, Record, Value};

/// Compares two values of the same type.
///
/// Numeric variants compare across widths. Returns `None` on a type mismatch
/// or when `NaN` is involved. `None` values sort after everything else.
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Option<Ordering> {
    match (a, b) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),

        (Value::None, Value::None) => Some(Ordering::Equal),
        (Value::None, _) => Some(Ordering::Greater),
        (_, Value::None) => Some(Ordering::Less),

        (a, b) if a.is_number() && b.is_number() => a.as_f64()?.partial_cmp(&b.as_f64()?),

        _ => None,
    }
}

/// Compares two records on one field.
///
/// The direction flips present values only: absent values stay last either
/// way. Incomparable pairs compare equal, which keeps a stable sort stable.
pub fn compare_records<R: Record>(a: &R, b: &R, field: &str, dir: Dir) -> Ordering {
    let a = a.field_value(field);
    let b = b.field_value(field);
    match (a.is_none(), b.is_none()) {
        (false, false) => compare_values(&a, &b)
            .map(|ordering| dir.apply(ordering))
            .unwrap_or(Ordering::Equal),
        _ => compare_values(&a, &b).unwrap_or(Ordering::Equal),
    }
}
