//! Shared in-memory row storage.

use std::sync::{Arc, RwLock};

use gridserve::{Record, Storage};

use crate::error::{Result, SeekerError};
use crate::query::MemoryQuery;

/// A vector of records behind a lock, shared by every query it hands out.
///
/// Cloning the store is cheap and shares the rows.
pub struct MemoryStore<R> {
    rows: Arc<RwLock<Vec<R>>>,
}

impl<R> MemoryStore<R> {
    /// Creates a store holding `rows` in the given order.
    pub fn new(rows: Vec<R>) -> Self {
        MemoryStore {
            rows: Arc::new(RwLock::new(rows)),
        }
    }

    /// Appends a record.
    pub fn insert(&self, row: R) -> Result<()> {
        self.rows
            .write()
            .map_err(|_| SeekerError::Poisoned)?
            .push(row);
        Ok(())
    }

    /// Appends several records.
    pub fn extend(&self, rows: impl IntoIterator<Item = R>) -> Result<()> {
        self.rows
            .write()
            .map_err(|_| SeekerError::Poisoned)?
            .extend(rows);
        Ok(())
    }

    /// Number of stored records.
    pub fn len(&self) -> Result<usize> {
        Ok(self.rows.read().map_err(|_| SeekerError::Poisoned)?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl<R> Clone for MemoryStore<R> {
    fn clone(&self) -> Self {
        MemoryStore {
            rows: Arc::clone(&self.rows),
        }
    }
}

impl<R> Default for MemoryStore<R> {
    fn default() -> Self {
        MemoryStore::new(Vec::new())
    }
}

impl<R> FromIterator<R> for MemoryStore<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        MemoryStore::new(iter.into_iter().collect())
    }
}

impl<R: Record + Clone> Storage<R> for MemoryStore<R> {
    type Query = MemoryQuery<R>;

    fn query(&self) -> MemoryQuery<R> {
        MemoryQuery::new(Arc::clone(&self.rows))
    }
}
