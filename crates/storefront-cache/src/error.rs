//! Storage error types.

use thiserror::Error;

/// Errors that can occur when reading or writing the key-value store.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to open the store.
    #[error("Failed to open store: {0}")]
    OpenError(String),

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Failed to perform a store operation.
    #[error("Store operation failed: {0}")]
    StoreError(String),

    /// Filesystem error from a disk-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
