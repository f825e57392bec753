//! Translation of loosely-typed request parts into typed query operations.
//!
//! The widget only speaks in column indices and raw strings. [`Translator`]
//! resolves each index against the field registry and lets the field's
//! [`FieldType`] decide what a search string means for it:
//!
//! | Type | Column search | Global search |
//! |------|---------------|---------------|
//! | String | `like` | `like` |
//! | Int, Float64, Float32 | `low-high` range, else `eq` | `eq` |
//! | Date | `low-high` range, else `eq` (via the date formatter) | `eq` |
//! | Bool | `eq` on `true`/`false` | `eq` |
//!
//! Input that does not parse for the field's type adds no predicate at all.

use tracing::trace;

use crate::date::DateFormatter;
use crate::field::{Field, Fields};
use crate::record::Record;
use crate::request::Order;
use crate::storage::{Dir, FilterOp, Filterable, Group};

/// A `low-high` search string split into its two trimmed bounds.
///
/// Splits on `-` and drops empty pieces, so `"-5"` is a single token (and
/// therefore not a range) while `"3 - 7"` yields `3` and `7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchRange<'a> {
    pub low: &'a str,
    pub high: &'a str,
}

impl<'a> SearchRange<'a> {
    /// Splits `search`, returning `None` unless there are exactly two tokens.
    pub fn parse(search: &'a str) -> Option<Self> {
        let mut tokens = search
            .split('-')
            .filter(|token| !token.is_empty())
            .map(str::trim);
        let low = tokens.next()?;
        let high = tokens.next()?;
        if tokens.next().is_some() {
            return None;
        }
        Some(SearchRange { low, high })
    }
}

/// The resolved sort of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: &'static str,
    pub dir: Dir,
}

/// Per-request view over the field registry and date formatter.
#[derive(Clone, Copy)]
pub struct Translator<'a> {
    fields: &'a Fields,
    dates: &'a dyn DateFormatter,
}

impl<'a> Translator<'a> {
    pub fn new(fields: &'a Fields, dates: &'a dyn DateFormatter) -> Self {
        Translator { fields, dates }
    }

    /// Resolves the request's sort.
    ///
    /// Defaults to ascending by [`Record::ID_FIELD`]. When the first order
    /// entry names a resolvable column, sorts by that field, descending if
    /// `dir == "desc"`. An empty order list or an unknown column keeps the
    /// default untouched, direction included.
    pub fn sort<R: Record>(&self, order: Option<&Order>) -> Sort {
        let default = Sort {
            field: R::ID_FIELD,
            dir: Dir::Asc,
        };
        let Some(order) = order else {
            return default;
        };

        let dir = if order.dir == "desc" {
            Dir::Desc
        } else {
            Dir::Asc
        };
        match self.fields.resolve(order.column) {
            Some(field) => Sort {
                field: field.name(),
                dir,
            },
            None => {
                trace!(column = order.column, "sort column out of range, keeping default");
                default
            }
        }
    }

    /// Folds the predicate for column `index` and `search` into `builder`.
    ///
    /// With `range` set, numeric and date columns accept `low-high` and
    /// become `field >= low AND field <= high`. The bounds are used as given,
    /// so a reversed range matches nothing. Returns `builder` untouched when
    /// the index is out of range or the input does not parse.
    pub fn apply_filter<B: Filterable>(
        &self,
        index: i64,
        builder: B,
        search: &str,
        range: bool,
    ) -> B {
        let Some(field) = self.fields.resolve(index) else {
            trace!(column = index, "filter column out of range, skipping");
            return builder;
        };
        let ty = field.ty();

        if ty.is_text() {
            return match ty.parse(search, self.dates) {
                Some(value) => builder.filter(field.name(), FilterOp::Like, value),
                None => builder,
            };
        }

        if range && ty.supports_range() {
            if let Some(bounds) = SearchRange::parse(search) {
                return match (
                    ty.parse(bounds.low, self.dates),
                    ty.parse(bounds.high, self.dates),
                ) {
                    (Some(low), Some(high)) => builder
                        .filter(field.name(), FilterOp::Gte, low)
                        .filter(field.name(), FilterOp::Lte, high),
                    _ => {
                        skipped(field, search);
                        builder
                    }
                };
            }
        }

        match ty.parse(search, self.dates) {
            Some(value) => builder.filter(field.name(), FilterOp::Eq, value),
            None => {
                skipped(field, search);
                builder
            }
        }
    }

    /// Adds one equality-or-substring attempt per exposed field to `group`.
    ///
    /// Meant for an OR group: a record matches when any field does.
    pub fn global_search(&self, group: Group, search: &str) -> Group {
        (0..self.fields.len()).fold(group, |group, index| {
            self.apply_filter(index as i64, group, search, false)
        })
    }
}

fn skipped(field: &Field, search: &str) {
    trace!(
        field = field.name(),
        ty = %field.ty(),
        search,
        "search does not parse for field type, skipping"
    );
}
