//! Record store error types.

use thiserror::Error;

/// Errors that can occur during record store operations.
#[derive(Debug, Error)]
pub enum RecordStoreError {
    /// A tenant with the given name already exists.
    #[error("tenant name already exists: {0}")]
    DuplicateName(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for record store operations.
pub type RecordStoreResult<T> = Result<T, RecordStoreError>;
