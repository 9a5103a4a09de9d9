//! Storage error types.

use thiserror::Error;

/// Errors that can occur when using device storage.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to read or write the backing file.
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize or deserialize a stored value.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
