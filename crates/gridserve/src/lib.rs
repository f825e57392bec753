//! Gridserve - server-side processing for DataTables-style grid widgets.
//!
//! A grid widget asks the server for one page of rows at a time. Its request
//! names columns by index and carries raw search strings; gridserve turns that
//! into typed operations against a storage collaborator and renders the
//! result back into the string matrix the widget displays.
//!
//! - Column searches are AND-combined. Numeric and date columns accept
//!   `low-high` ranges.
//! - A global search probes every exposed field inside one OR group.
//! - Input that does not parse for a field's type is dropped, never reported.
//! - Paged data, the total count and the filtered count are fetched
//!   concurrently.
//!
//! # Quick Start
//!
//! ```rust
//! use gridserve::{DataTable, Field, Record, Value};
//!
//! struct User {
//!     id: i64,
//!     name: String,
//! }
//!
//! impl Record for User {
//!     fn field_value(&self, field: &str) -> Value<'_> {
//!         match field {
//!             "id" => Value::Int(self.id),
//!             "name" => Value::String(&self.name),
//!             _ => Value::None,
//!         }
//!     }
//! }
//!
//! let table = DataTable::<User>::new(vec![Field::int("id"), Field::string("name")]);
//! let cells = table.render(&[User { id: 1, name: "Ann".into() }]);
//! assert_eq!(cells, vec![vec!["1", "Ann"]]);
//! ```
//!
//! Pair a table with any [`Storage`] implementation and call
//! [`DataTable::handle`] (or [`DataTable::handle_json`] for raw bodies).
//! The `gridserve-seeker` crate provides an in-memory one.
//!
//! # Derive
//!
//! With the default `derive` feature, `#[derive(Record)]` generates the field
//! accessor, one name constant per column and a `fields()` registry:
//!
//! ```rust
//! # #[cfg(feature = "derive")]
//! # {
//! use gridserve::{DataTable, Record};
//!
//! #[derive(Record)]
//! struct User {
//!     #[column(Int)]
//!     id: i64,
//!     #[column(String)]
//!     name: String,
//!     #[column(String)]
//!     nickname: Option<String>,
//! }
//!
//! assert_eq!(User::NAME, "name");
//! let table = DataTable::<User>::new(User::fields());
//! assert_eq!(table.fields().len(), 3);
//! # }
//! ```

mod date;
mod error;
mod field;
mod project;
mod record;
mod request;
mod response;
mod storage;
mod table;
mod translate;
mod value;

#[cfg(test)]
mod test_support;

pub use date::{DateFormatter, PatternFormatter};
pub use error::{Error, Result};
pub use field::{Field, FieldType, Fields};
pub use project::render_rows;
pub use record::Record;
pub use request::{Column, Order, Request, Search, SearchMode, DEFAULT_WINDOW};
pub use response::Response;
pub use storage::{
    Dir, FieldFilter, Filter, FilterOp, Filterable, Group, QueryBuilder, Relation, Storage,
};
pub use table::DataTable;
pub use translate::{SearchRange, Sort, Translator};
pub use value::{AsDate, FieldValue, Value};

#[cfg(feature = "derive")]
pub use gridserve_macros::Record;
