//! Error types for the gridserve crate.
//!
//! Malformed search input is never an error: it only narrows less. What is
//! left is the JSON codec and whatever the storage collaborator reports.

use thiserror::Error;

/// Errors that can occur while handling a table request.
#[derive(Debug, Error)]
pub enum Error {
    /// The request body could not be decoded or the response encoded.
    #[error("invalid table payload: {0}")]
    Json(#[from] serde_json::Error),

    /// A data or count query failed in the storage collaborator.
    #[error("storage query failed: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wraps a storage collaborator's error.
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Storage(Box::new(err))
    }
}

/// Result type for gridserve operations.
pub type Result<T> = std::result::Result<T, Error>;
