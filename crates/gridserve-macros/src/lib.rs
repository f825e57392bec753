//! Proc macros for Gridserve.
//!
//! # Available Macros
//!
//! - [`Record`](derive@Record) - Generate the `Record` accessor, field name
//!   constants and a field registry from struct annotations
//!
//! Use it through the `gridserve` crate, which re-exports it next to the
//! trait of the same name.

mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives the `Record` trait for types served to a table widget.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `String` | Text column, searched with `like` |
/// | `Int` | Integer column (any primitive integer, widened to `i64`) |
/// | `Float64` | Double precision column |
/// | `Float32` | Single precision column |
/// | `Bool` | Boolean column |
/// | `Date` | Date column, the field type must implement `AsDate` |
/// | `id` | This field is the default sort key (otherwise `"id"`) |
/// | `skip` | Leave the field out |
/// | `rename = "..."` | Use a custom field name |
/// | `ty = "..."` | Column type as a string |
///
/// Fields without a `#[column(...)]` attribute are left out. Wrapping the
/// field type in `Option<_>` makes the column optional: an absent value reads
/// as `Value::None` and renders as an empty cell.
///
/// # Generated Code
///
/// 1. Field name constants (e.g., `User::NAME`, `User::LAST_LOGIN`)
/// 2. `fn fields() -> Fields`, the registry in declaration order
/// 3. The `Record` implementation
///
/// # Example
///
/// ```ignore
/// use chrono::NaiveDate;
/// use gridserve::{DataTable, Record};
///
/// #[derive(Record)]
/// struct User {
///     #[column(Int, id)]
///     user_id: u32,
///
///     #[column(String)]
///     name: String,
///
///     #[column(Date, rename = "last_login")]
///     seen: Option<NaiveDate>,
///
///     #[column(skip)]
///     password_hash: String,
/// }
///
/// let table = DataTable::<User>::new(User::fields());
/// assert_eq!(User::LAST_LOGIN, "last_login");
/// ```
#[proc_macro_derive(Record, attributes(column))]
pub fn record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::record_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
