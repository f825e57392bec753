//! Runtime value types for field reads and predicates.
//!
//! [`Value`] is what a [`Record`](crate::Record) hands back when a field is
//! read; it borrows from the record. [`FieldValue`] is the owned counterpart
//! stored inside predicates once a search string has been parsed.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Runtime value of a field, borrowed from the source record.
///
/// # Example
///
/// ```
/// use gridserve::Value;
///
/// struct User {
///     name: String,
///     nickname: Option<String>,
/// }
///
/// fn read<'a>(user: &'a User, field: &str) -> Value<'a> {
///     match field {
///         "name" => Value::String(&user.name),
///         "nickname" => user.nickname.as_deref().map_or(Value::None, Value::String),
///         _ => Value::None,
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Signed integer.
    Int(i64),
    /// Double precision float.
    Float64(f64),
    /// Single precision float.
    Float32(f32),
    /// Boolean value.
    Bool(bool),
    /// Point in time.
    Date(DateTime<Utc>),
    /// Field absent, null, or unknown.
    None,
}

impl Value<'_> {
    /// Returns `true` if this is a `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Returns `true` for any of the numeric variants.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float64(_) | Value::Float32(_))
    }

    /// Returns `true` if this is a `Date` value.
    pub fn is_date(&self) -> bool {
        matches!(self, Value::Date(_))
    }

    /// Widens any numeric variant to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float64(n) => Some(*n),
            Value::Float32(n) => Some(f64::from(*n)),
            _ => None,
        }
    }
}

/// Owned value held by a predicate.
///
/// Produced by [`FieldType::parse`](crate::FieldType::parse) from a raw
/// search string, then handed to the storage collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// String value.
    String(String),
    /// Signed integer.
    Int(i64),
    /// Double precision float.
    Float64(f64),
    /// Single precision float.
    Float32(f32),
    /// Boolean value.
    Bool(bool),
    /// Point in time.
    Date(DateTime<Utc>),
}

impl FieldValue {
    /// Borrows this value as a [`Value`].
    pub fn as_value(&self) -> Value<'_> {
        match self {
            FieldValue::String(s) => Value::String(s),
            FieldValue::Int(n) => Value::Int(*n),
            FieldValue::Float64(n) => Value::Float64(*n),
            FieldValue::Float32(n) => Value::Float32(*n),
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Date(d) => Value::Date(*d),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Int(n)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::Int(i64::from(n))
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Float64(n)
    }
}

impl From<f32> for FieldValue {
    fn from(n: f32) -> Self {
        FieldValue::Float32(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(d: DateTime<Utc>) -> Self {
        FieldValue::Date(d)
    }
}

/// Conversion of date-like field types into a UTC instant.
///
/// Used by `#[derive(Record)]` for fields marked `#[column(Date)]`.
/// Implement it for your own datetime wrappers to expose them as dates.
///
/// ```
/// use chrono::{DateTime, Utc};
/// use gridserve::AsDate;
///
/// struct Stamp(i64);
///
/// impl AsDate for Stamp {
///     fn as_date(&self) -> DateTime<Utc> {
///         DateTime::from_timestamp(self.0, 0).unwrap_or_default()
///     }
/// }
/// ```
pub trait AsDate {
    /// Returns this value as a UTC instant.
    fn as_date(&self) -> DateTime<Utc>;
}

impl AsDate for DateTime<Utc> {
    fn as_date(&self) -> DateTime<Utc> {
        *self
    }
}

impl AsDate for NaiveDateTime {
    fn as_date(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(self)
    }
}

impl AsDate for NaiveDate {
    fn as_date(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.and_time(chrono::NaiveTime::MIN))
    }
}
