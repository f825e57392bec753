//! Error types for the seeker crate.

use thiserror::Error;

/// Errors that can occur when executing queries against a [`MemoryStore`](crate::MemoryStore).
#[derive(Debug, Error)]
pub enum SeekerError {
    /// A writer panicked while holding the row lock.
    #[error("row store lock poisoned")]
    Poisoned,
}

/// Result type for seeker operations.
pub type Result<T> = std::result::Result<T, SeekerError>;
