//! The record trait read by the translator and by storage engines.
//!
//! This module provides the [`Record`] trait, implemented by the
//! `#[derive(Record)]` macro or by hand, which gives name-based access to a
//! record's fields as [`Value`]s.

use crate::value::Value;

/// A row type that can be served to a table widget.
///
/// # Derive Usage
///
/// ```
/// # #[cfg(feature = "derive")] {
/// use gridserve::{Record, Value};
///
/// #[derive(Record)]
/// struct Invoice {
///     #[column(Int, id)]
///     number: i64,
///     #[column(String)]
///     customer: String,
///     #[column(Float64)]
///     total: Option<f64>,
/// }
///
/// let invoice = Invoice { number: 7, customer: "ACME".into(), total: None };
/// assert_eq!(invoice.field_value(Invoice::CUSTOMER), Value::String("ACME"));
/// assert_eq!(invoice.field_value("total"), Value::None);
/// assert_eq!(<Invoice as Record>::ID_FIELD, "number");
/// # }
/// ```
///
/// # Manual Implementation
///
/// ```
/// use gridserve::{Record, Value};
///
/// struct Invoice {
///     id: i64,
///     customer: String,
/// }
///
/// impl Record for Invoice {
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "id" => Value::Int(self.id),
///             "customer" => Value::String(&self.customer),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
pub trait Record: Send + Sync + 'static {
    /// Name of the primary identifier field, the default sort key.
    const ID_FIELD: &'static str = "id";

    /// Returns the value of a field.
    ///
    /// Absent optionals and unknown field names read as [`Value::None`].
    fn field_value(&self, field: &str) -> Value<'_>;
}
