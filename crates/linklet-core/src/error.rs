use thiserror::Error;

/// Result type for backing-store operations.
pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("invalid reserved key: {0}")]
    InvalidKey(String),
}

/// Errors surfaced by [`UrlCollection`](crate::UrlCollection) adapters.
///
/// Adapters classify their native failures into these variants so callers
/// can react to a uniqueness violation (`Conflict`) or a missing record
/// (`NotFound`) without inspecting driver-specific codes or messages.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("key already exists: {0}")]
    Conflict(String),
    #[error("no record for key: {0}")]
    NotFound(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}
