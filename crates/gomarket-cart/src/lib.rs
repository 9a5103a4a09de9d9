//! Shopping cart state container for GoMarket.
//!
//! This crate provides the cart domain types and a persistent state
//! container for storefront clients:
//!
//! - **Items**: products and quantity-bearing line items
//! - **Cart**: the in-memory ordered collection and its reconciliation rules
//! - **CartStore**: persistence and change notification around a cart
//!
//! # Example
//!
//! ```rust,ignore
//! use gomarket_cart::prelude::*;
//! use gomarket_storage::DeviceStore;
//!
//! let storage = DeviceStore::open("data/storage.json").await?;
//! let store = CartStore::load(storage, StoreConfig::default()).await?;
//!
//! store.add_to_cart(Product::new("p-1", "Keyboard", "https://img/p-1", 149.9)).await?;
//! store.increment(&ProductId::new("p-1")).await?;
//!
//! for item in store.products() {
//!     println!("{} x{}", item.title, item.quantity);
//! }
//! ```

pub mod cart;
pub mod config;
pub mod error;
pub mod ids;
pub mod item;
pub mod store;

pub use cart::{Cart, DecrementOutcome};
pub use config::{StoreConfig, DEFAULT_STORAGE_KEY};
pub use error::CartStoreError;
pub use ids::ProductId;
pub use item::{CartItem, Product};
pub use store::CartStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{Cart, DecrementOutcome};
    pub use crate::config::{StoreConfig, DEFAULT_STORAGE_KEY};
    pub use crate::error::CartStoreError;
    pub use crate::ids::ProductId;
    pub use crate::item::{CartItem, Product};
    pub use crate::store::CartStore;
}
