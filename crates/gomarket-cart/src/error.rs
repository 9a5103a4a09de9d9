//! Cart store error types.

use thiserror::Error;

/// Errors that can occur in cart store operations.
#[derive(Error, Debug)]
pub enum CartStoreError {
    /// Device storage failed to read or write the collection.
    #[error("Storage error: {0}")]
    Storage(#[from] gomarket_storage::StorageError),
}
