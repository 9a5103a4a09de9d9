//! Cart store configuration.

/// Storage key the mobile client has always used for the cart slot.
pub const DEFAULT_STORAGE_KEY: &str = "@GoMarketplace:products";

/// Configuration for a [`CartStore`](crate::CartStore).
///
/// # Example
///
/// ```rust,ignore
/// let config = StoreConfig::default().with_storage_key("cart:staging");
/// let store = CartStore::load(storage, config).await?;
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Storage key the serialized collection lives under.
    pub storage_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    /// Create a configuration with the default storage key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }
}
