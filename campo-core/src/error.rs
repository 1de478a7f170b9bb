//! Error types for the campo crates.

use thiserror::Error;

/// Errors that can occur in campo operations.
///
/// Not-found conditions (e.g. updating a task id that is no longer in its
/// bucket) are deliberately *not* errors: the presentation layer may issue
/// stale requests after concurrent edits, so those are silent no-ops.
#[derive(Error, Debug)]
pub enum CampoError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid date key '{0}', expected YYYY-MM-DD")]
    InvalidDateKey(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for campo operations.
pub type CampoResult<T> = Result<T, CampoError>;
