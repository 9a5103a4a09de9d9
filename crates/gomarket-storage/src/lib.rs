//! JSON file-backed device storage for GoMarket.
//!
//! Provides a simple, ergonomic API for persisting small amounts of client
//! state in string-keyed slots with automatic JSON serialization. This is
//! the local-device analog of a mobile key-value store: values are stored
//! as JSON text and the backing file is rewritten wholesale on every write.
//!
//! # Example
//!
//! ```rust,ignore
//! use gomarket_storage::DeviceStore;
//!
//! let storage = DeviceStore::open("data/storage.json").await?;
//!
//! // Store a value
//! storage.set("@GoMarketplace:products", &items).await?;
//!
//! // Retrieve a value
//! let items: Option<Vec<CartItem>> = storage.get("@GoMarketplace:products").await?;
//!
//! // Delete a value
//! storage.remove("@GoMarketplace:products").await?;
//! ```

mod error;
mod store;

pub use error::StorageError;
pub use store::DeviceStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{DeviceStore, StorageError};
}
