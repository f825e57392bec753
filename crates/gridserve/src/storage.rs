//! The storage collaborator interface.
//!
//! The translator never executes anything itself. It drives a
//! [`QueryBuilder`] obtained from a [`Storage`]: folds in filters, wraps the
//! global search in an OR [`Group`], sets sort and window, clones the builder
//! for a second terminal operation, and finally awaits
//! [`all`](QueryBuilder::all) and [`count`](QueryBuilder::count).

use std::cmp::Ordering;
use std::fmt;
use std::ops::Range;

use async_trait::async_trait;

use crate::value::FieldValue;

/// Comparison operator of a single field filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOp {
    /// Equal.
    Eq,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Pattern match on strings, `LIKE`-style.
    Like,
}

impl FilterOp {
    /// Evaluates an ordering-based operator given `field.cmp(value)`.
    ///
    /// `Like` is not ordering-based and always returns `false` here.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            FilterOp::Eq => ordering == Ordering::Equal,
            FilterOp::Gt => ordering == Ordering::Greater,
            FilterOp::Gte => ordering != Ordering::Less,
            FilterOp::Lt => ordering == Ordering::Less,
            FilterOp::Lte => ordering != Ordering::Greater,
            FilterOp::Like => false,
        }
    }

    /// Returns the display name of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            FilterOp::Eq => "eq",
            FilterOp::Lt => "lt",
            FilterOp::Lte => "lte",
            FilterOp::Gt => "gt",
            FilterOp::Gte => "gte",
            FilterOp::Like => "like",
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the members of a [`Group`] combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Relation {
    /// Every member must match.
    #[default]
    And,
    /// At least one member must match.
    Or,
}

impl Relation {
    pub fn as_str(self) -> &'static str {
        match self {
            Relation::And => "and",
            Relation::Or => "or",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Applies this direction to an ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single `field op value` predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    /// The record field to compare.
    pub field: String,
    /// The comparison operator.
    pub op: FilterOp,
    /// The value to compare against.
    pub value: FieldValue,
}

impl FieldFilter {
    pub fn new(field: impl Into<String>, op: FilterOp, value: impl Into<FieldValue>) -> Self {
        FieldFilter {
            field: field.into(),
            op,
            value: value.into(),
        }
    }
}

/// A node of a filter tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Field(FieldFilter),
    Group(Group),
}

/// A set of filters combined with one [`Relation`].
///
/// An empty group places no constraint, whatever its relation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    relation: Relation,
    filters: Vec<Filter>,
}

impl Group {
    /// Creates an empty group.
    pub fn new(relation: Relation) -> Self {
        Group {
            relation,
            filters: Vec::new(),
        }
    }

    /// Adds a nested group built by `build`.
    pub fn group<F>(mut self, relation: Relation, build: F) -> Self
    where
        F: FnOnce(Group) -> Group,
    {
        self.filters
            .push(Filter::Group(build(Group::new(relation))));
        self
    }

    pub fn relation(&self) -> Relation {
        self.relation
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Consumes the group, returning its members.
    pub fn into_filters(self) -> Vec<Filter> {
        self.filters
    }
}

/// Anything that field filters can be folded into.
///
/// Implemented by [`Group`] and by every [`QueryBuilder`], so the predicate
/// builder works the same at the top level of a query and inside a group.
pub trait Filterable: Sized {
    /// Adds a `field op value` filter.
    fn filter(self, field: &str, op: FilterOp, value: FieldValue) -> Self;
}

impl Filterable for Group {
    fn filter(mut self, field: &str, op: FilterOp, value: FieldValue) -> Self {
        self.filters
            .push(Filter::Field(FieldFilter::new(field, op, value)));
        self
    }
}

/// A query under construction against one record type.
///
/// Top-level filters combine with AND. `Clone` gives an independent copy, used
/// to run a count alongside the paged data fetch.
#[async_trait]
pub trait QueryBuilder<R: Send>: Filterable + Clone + Send + 'static {
    /// Failure reported by `all` or `count`.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Adds a group of filters combined with `relation`.
    fn group<F>(self, relation: Relation, build: F) -> Self
    where
        F: FnOnce(Group) -> Group;

    /// Sets the sort field and direction.
    fn sort(self, field: &str, dir: Dir) -> Self;

    /// Restricts results to the half-open window `range` of the sorted set.
    fn range(self, range: Range<usize>) -> Self;

    /// Fetches matching records.
    async fn all(self) -> Result<Vec<R>, Self::Error>;

    /// Counts matching records, ignoring any window.
    async fn count(self) -> Result<u64, Self::Error>;
}

/// Source of fresh queries over one record type.
pub trait Storage<R: Send>: Send + Sync {
    type Query: QueryBuilder<R>;

    /// Starts an unfiltered query.
    fn query(&self) -> Self::Query;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_op_eval_ordering() {
        assert!(FilterOp::Eq.eval_ordering(Ordering::Equal));
        assert!(!FilterOp::Eq.eval_ordering(Ordering::Less));

        assert!(FilterOp::Gte.eval_ordering(Ordering::Equal));
        assert!(FilterOp::Gte.eval_ordering(Ordering::Greater));
        assert!(!FilterOp::Gte.eval_ordering(Ordering::Less));

        assert!(FilterOp::Lte.eval_ordering(Ordering::Equal));
        assert!(FilterOp::Lte.eval_ordering(Ordering::Less));
        assert!(!FilterOp::Lte.eval_ordering(Ordering::Greater));

        assert!(FilterOp::Gt.eval_ordering(Ordering::Greater));
        assert!(!FilterOp::Gt.eval_ordering(Ordering::Equal));
        assert!(FilterOp::Lt.eval_ordering(Ordering::Less));
        assert!(!FilterOp::Lt.eval_ordering(Ordering::Equal));

        assert!(!FilterOp::Like.eval_ordering(Ordering::Equal));
    }

    #[test]
    fn dir_apply() {
        assert_eq!(Dir::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(Dir::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(Dir::default(), Dir::Asc);
    }

    #[test]
    fn display_names() {
        assert_eq!(FilterOp::Like.to_string(), "like");
        assert_eq!(FilterOp::Gte.to_string(), "gte");
        assert_eq!(Relation::Or.to_string(), "or");
        assert_eq!(Dir::Desc.to_string(), "desc");
    }

    #[test]
    fn group_collects_filters_in_order() {
        let group = Group::new(Relation::Or)
            .filter("name", FilterOp::Like, FieldValue::from("ann"))
            .filter("id", FilterOp::Eq, FieldValue::Int(3))
            .group(Relation::And, |g| {
                g.filter("age", FilterOp::Gte, FieldValue::Int(18))
            });

        assert_eq!(group.relation(), Relation::Or);
        assert_eq!(
            group.filters()[0],
            Filter::Field(FieldFilter::new("name", FilterOp::Like, "ann"))
        );
        assert_eq!(
            group.filters()[1],
            Filter::Field(FieldFilter::new("id", FilterOp::Eq, 3i64))
        );
        match &group.filters()[2] {
            Filter::Group(inner) => {
                assert_eq!(inner.relation(), Relation::And);
                assert_eq!(inner.filters().len(), 1);
            }
            other => panic!("expected nested group, got {other:?}"),
        }
    }

    #[test]
    fn empty_group() {
        assert!(Group::new(Relation::Or).is_empty());
        assert!(Group::default().into_filters().is_empty());
    }
}
