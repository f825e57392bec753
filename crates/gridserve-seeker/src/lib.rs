//! Seeker - in-memory storage for Gridserve tables.
//!
//! [`MemoryStore`] implements [`gridserve::Storage`] over a vector of
//! records. It is the reference backend for the translator and a convenient
//! one for tests, prototypes and small fixed datasets. It supports:
//!
//! - AND and OR filter groups, nested to any depth
//! - `eq`, `lt`, `lte`, `gt`, `gte` on every value type, numerics compared
//!   across widths
//! - `like` as a case-insensitive substring match
//! - Stable single-field sorting with absent values last
//! - Window slicing and counts
//!
//! # Quick Start
//!
//! ```rust
//! use gridserve::{DataTable, Field, Record, Request, Value};
//! use gridserve_seeker::MemoryStore;
//!
//! #[derive(Clone)]
//! struct Fruit {
//!     id: i64,
//!     name: String,
//! }
//!
//! impl Record for Fruit {
//!     fn field_value(&self, field: &str) -> Value<'_> {
//!         match field {
//!             "id" => Value::Int(self.id),
//!             "name" => Value::String(&self.name),
//!             _ => Value::None,
//!         }
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> gridserve::Result<()> {
//! let store: MemoryStore<Fruit> = ["pear", "apple", "plum"]
//!     .into_iter()
//!     .enumerate()
//!     .map(|(i, name)| Fruit { id: i as i64 + 1, name: name.into() })
//!     .collect();
//!
//! let table = DataTable::<Fruit>::new(vec![Field::int("id"), Field::string("name")]);
//! let request = Request::from_json(br#"{
//!     "draw": 1,
//!     "columns": [],
//!     "order": [],
//!     "start": 0,
//!     "length": 10,
//!     "search": {"value": "P", "regex": false}
//! }"#)?;
//!
//! let response = table.handle(&store, &request).await?;
//! assert_eq!(response.total_records, 3);
//! assert_eq!(response.display_records, 3);
//! assert_eq!(response.data[1], vec!["2", "apple"]);
//! # Ok(())
//! # }
//! ```

mod clause;
mod error;
mod ordering;
mod query;
mod store;

pub use clause::{field_matches, filter_matches, group_matches};
pub use error::{Result, SeekerError};
pub use ordering::{compare_records, compare_values};
pub use query::MemoryQuery;
pub use store::MemoryStore;
