//! The query builder returned by [`MemoryStore::query`](crate::MemoryStore).

use std::ops::Range;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use gridserve::{Dir, FieldValue, FilterOp, Filterable, Group, QueryBuilder, Record, Relation};
use tracing::trace;

use crate::clause::group_matches;
use crate::error::{Result, SeekerError};
use crate::ordering::compare_records;

/// A query over the rows of a [`MemoryStore`](crate::MemoryStore).
///
/// Building is free; the rows are only read when [`all`](QueryBuilder::all)
/// or [`count`](QueryBuilder::count) runs. Top-level filters combine with AND.
pub struct MemoryQuery<R> {
    rows: Arc<RwLock<Vec<R>>>,
    root: Group,
    sort: Option<(String, Dir)>,
    range: Option<Range<usize>>,
}

impl<R> MemoryQuery<R> {
    pub(crate) fn new(rows: Arc<RwLock<Vec<R>>>) -> Self {
        MemoryQuery {
            rows,
            root: Group::new(Relation::And),
            sort: None,
            range: None,
        }
    }

    /// The filters added so far.
    pub fn filters(&self) -> &Group {
        &self.root
    }
}

impl<R: Record + Clone> MemoryQuery<R> {
    /// Runs the query synchronously: filter, stable sort, then window.
    pub fn select(&self) -> Result<Vec<R>> {
        let rows = self.rows.read().map_err(|_| SeekerError::Poisoned)?;

        let mut matched: Vec<&R> = rows
            .iter()
            .filter(|row| group_matches(&self.root, *row))
            .collect();

        if let Some((field, dir)) = &self.sort {
            matched.sort_by(|a, b| compare_records(*a, *b, field, *dir));
        }

        let total = matched.len();
        let window = match &self.range {
            Some(range) => matched
                .into_iter()
                .skip(range.start)
                .take(range.end.saturating_sub(range.start))
                .cloned()
                .collect(),
            None => matched.into_iter().cloned().collect::<Vec<R>>(),
        };

        trace!(
            scanned = rows.len(),
            matched = total,
            returned = window.len(),
            "memory query selected rows"
        );
        Ok(window)
    }

    /// Counts matching rows synchronously, ignoring sort and window.
    pub fn tally(&self) -> Result<u64> {
        let rows = self.rows.read().map_err(|_| SeekerError::Poisoned)?;
        let count = rows
            .iter()
            .filter(|row| group_matches(&self.root, *row))
            .count();

        trace!(scanned = rows.len(), matched = count, "memory query counted rows");
        Ok(count as u64)
    }
}

impl<R> Clone for MemoryQuery<R> {
    fn clone(&self) -> Self {
        MemoryQuery {
            rows: Arc::clone(&self.rows),
            root: self.root.clone(),
            sort: self.sort.clone(),
            range: self.range.clone(),
        }
    }
}

impl<R> Filterable for MemoryQuery<R> {
    fn filter(mut self, field: &str, op: FilterOp, value: FieldValue) -> Self {
        self.root = self.root.filter(field, op, value);
        self
    }
}

#[async_trait]
impl<R: Record + Clone> QueryBuilder<R> for MemoryQuery<R> {
    type Error = SeekerError;

    fn group<F>(mut self, relation: Relation, build: F) -> Self
    where
        F: FnOnce(Group) -> Group,
    {
        self.root = self.root.group(relation, build);
        self
    }

    fn sort(mut self, field: &str, dir: Dir) -> Self {
        self.sort = Some((field.to_string(), dir));
        self
    }

    fn range(mut self, range: Range<usize>) -> Self {
        self.range = Some(range);
        self
    }

    async fn all(self) -> Result<Vec<R>> {
        self.select()
    }

    async fn count(self) -> Result<u64> {
        self.tally()
    }
}
