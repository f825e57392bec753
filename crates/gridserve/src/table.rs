//! Request dispatch: one table, one record type, one storage per call.
//!
//! A [`DataTable`] binds the exposed field list and a date formatter. Each
//! request is routed into one of three plans:
//!
//! - **column-filtered** when any column search is set: every non-empty column
//!   search is folded in with range parsing enabled, AND-combined;
//! - **globally-searched** otherwise, when the top-level search is set: a
//!   single OR group probes every exposed field;
//! - **unfiltered** when neither is set.
//!
//! The filtered plans run three queries concurrently (paged data, unfiltered
//! count, filtered count); the unfiltered plan needs only two, its single
//! count serving as both totals.

use std::marker::PhantomData;
use std::ops::Range;

use futures_util::try_join;
use tracing::debug;

use crate::date::{DateFormatter, PatternFormatter};
use crate::error::{Error, Result};
use crate::field::Fields;
use crate::project::render_rows;
use crate::record::Record;
use crate::request::{Request, SearchMode};
use crate::response::Response;
use crate::storage::{QueryBuilder, Relation, Storage};
use crate::translate::{Sort, Translator};

/// Server-side processing for one record type.
///
/// # Example
///
/// ```
/// # use std::convert::Infallible;
/// # use std::ops::Range;
/// # use chrono::{DateTime, Utc};
/// # use gridserve::{Dir, FieldValue, FilterOp, Filterable, Group, QueryBuilder, Relation, Storage};
/// use gridserve::{DataTable, Field, PatternFormatter, Record, Request, Value};
///
/// # #[derive(Clone)]
/// struct User {
///     id: i64,
///     name: String,
///     last_login: Option<DateTime<Utc>>,
/// }
///
/// impl Record for User {
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "id" => Value::Int(self.id),
///             "name" => Value::String(&self.name),
///             "last_login" => self.last_login.map_or(Value::None, Value::Date),
///             _ => Value::None,
///         }
///     }
/// }
/// #
/// # #[derive(Clone)]
/// # struct Users(Vec<User>);
/// #
/// # impl Filterable for Users {
/// #     fn filter(self, _: &str, _: FilterOp, _: FieldValue) -> Self {
/// #         self
/// #     }
/// # }
/// #
/// # #[async_trait::async_trait]
/// # impl QueryBuilder<User> for Users {
/// #     type Error = Infallible;
/// #     fn group<F>(self, _: Relation, _: F) -> Self
/// #     where
/// #         F: FnOnce(Group) -> Group,
/// #     {
/// #         self
/// #     }
/// #     fn sort(self, _: &str, _: Dir) -> Self {
/// #         self
/// #     }
/// #     fn range(self, _: Range<usize>) -> Self {
/// #         self
/// #     }
/// #     async fn all(self) -> Result<Vec<User>, Infallible> {
/// #         Ok(self.0)
/// #     }
/// #     async fn count(self) -> Result<u64, Infallible> {
/// #         Ok(self.0.len() as u64)
/// #     }
/// # }
/// #
/// # impl Storage<User> for Users {
/// #     type Query = Users;
/// #     fn query(&self) -> Users {
/// #         self.clone()
/// #     }
/// # }
/// #
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> gridserve::Result<()> {
/// # let store = Users(vec![User { id: 1, name: "Ann".into(), last_login: None }]);
/// let table = DataTable::<User>::new(vec![
///     Field::int("id"),
///     Field::string("name"),
///     Field::optional_date("last_login"),
/// ])
/// .with_date_formatter(PatternFormatter::new("%d/%m/%Y"));
///
/// let request = Request::from_json(br#"{
///     "draw": 1,
///     "columns": [],
///     "order": [],
///     "start": 0,
///     "length": 10,
///     "search": {"value": "", "regex": false}
/// }"#)?;
///
/// let response = table.handle(&store, &request).await?;
/// assert_eq!(response.data, vec![vec!["1", "Ann", ""]]);
/// # Ok(())
/// # }
/// ```
pub struct DataTable<R> {
    fields: Fields,
    dates: Box<dyn DateFormatter>,
    record: PhantomData<fn() -> R>,
}

impl<R: Record> DataTable<R> {
    /// Creates a table exposing `fields`, in column order, with the default
    /// [`PatternFormatter`].
    pub fn new(fields: impl Into<Fields>) -> Self {
        DataTable {
            fields: fields.into(),
            dates: Box::new(PatternFormatter::default()),
            record: PhantomData,
        }
    }

    /// Replaces the date formatter used for date searches and date cells.
    pub fn with_date_formatter(mut self, formatter: impl DateFormatter + 'static) -> Self {
        self.dates = Box::new(formatter);
        self
    }

    /// The exposed fields, in column order.
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// The active date formatter.
    pub fn date_formatter(&self) -> &dyn DateFormatter {
        self.dates.as_ref()
    }

    /// A translator over this table's fields and formatter.
    pub fn translator(&self) -> Translator<'_> {
        Translator::new(&self.fields, self.dates.as_ref())
    }

    /// Renders fetched rows into response cells.
    pub fn render(&self, rows: &[R]) -> Vec<Vec<String>> {
        render_rows(&self.fields, rows, self.dates.as_ref())
    }

    /// Answers one redraw request against `storage`.
    ///
    /// Malformed searches and unknown column indices degrade to broader
    /// results; only storage failures are returned as errors.
    ///
    /// # Panics
    ///
    /// Panics if a fetched record has no value for a required field.
    pub async fn handle<S>(&self, storage: &S, request: &Request) -> Result<Response>
    where
        S: Storage<R>,
    {
        let translator = self.translator();
        let sort = translator.sort::<R>(request.first_order());
        let window = request.window();
        let mode = request.mode();

        debug!(
            draw = request.draw,
            mode = mode.as_str(),
            start = window.start,
            end = window.end,
            sort_field = sort.field,
            sort_dir = %sort.dir,
            "dispatching table request"
        );

        let (rows, total, shown) = match mode {
            SearchMode::Columns(searches) => {
                let query = searches
                    .into_iter()
                    .fold(storage.query(), |query, (index, search)| {
                        translator.apply_filter(index, query, search, true)
                    });
                fetch_filtered(storage, query, sort, window).await?
            }
            SearchMode::Global(search) => {
                let query = storage
                    .query()
                    .group(Relation::Or, |group| translator.global_search(group, search));
                fetch_filtered(storage, query, sort, window).await?
            }
            SearchMode::Unfiltered => {
                let data = storage.query().sort(sort.field, sort.dir).range(window);
                let (rows, total) =
                    try_join!(data.all(), storage.query().count()).map_err(Error::storage)?;
                (rows, total, total)
            }
        };

        debug!(
            draw = request.draw,
            total,
            display = shown,
            rows = rows.len(),
            "table response assembled"
        );

        Ok(Response {
            echo: request.draw,
            total_records: total,
            display_records: shown,
            data: self.render(&rows),
        })
    }

    /// Decodes a JSON request body, handles it, and encodes the response.
    pub async fn handle_json<S>(&self, storage: &S, body: &[u8]) -> Result<String>
    where
        S: Storage<R>,
    {
        let request = Request::from_json(body)?;
        self.handle(storage, &request).await?.to_json()
    }
}

/// Runs the paged fetch, the unfiltered count, and the filtered count together.
async fn fetch_filtered<R, S>(
    storage: &S,
    query: S::Query,
    sort: Sort,
    window: Range<usize>,
) -> Result<(Vec<R>, u64, u64)>
where
    R: Record,
    S: Storage<R>,
{
    let filtered = query.clone();
    let data = query.sort(sort.field, sort.dir).range(window);
    try_join!(data.all(), storage.query().count(), filtered.count()).map_err(Error::storage)
}
