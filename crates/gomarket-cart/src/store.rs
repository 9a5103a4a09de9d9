//! Persistent cart state container.

use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use gomarket_storage::{DeviceStore, StorageError};

use crate::cart::{Cart, DecrementOutcome};
use crate::config::StoreConfig;
use crate::error::CartStoreError;
use crate::ids::ProductId;
use crate::item::{CartItem, Product};

/// Persistent shopping-cart state container.
///
/// Owns the in-memory collection, synchronizes it to a device storage slot
/// on every mutation and restores it on startup. Consumers hold the store
/// by reference (or inside an `Arc`), read cloned snapshots via
/// [`products`](Self::products) and observe changes through
/// [`subscribe`](Self::subscribe).
///
/// Each mutation applies to memory and persists the resulting snapshot
/// inside one critical section: the bytes on disk always reflect the
/// mutation that just completed, and logically concurrent mutations
/// serialize instead of racing on stale reads.
///
/// # Example
///
/// ```rust,ignore
/// let storage = DeviceStore::open("data/storage.json").await?;
/// let store = CartStore::load(storage, StoreConfig::default()).await?;
///
/// store.add_to_cart(Product::new("p-1", "Keyboard", "https://img/p-1", 149.9)).await?;
/// store.increment(&ProductId::new("p-1")).await?;
///
/// for item in store.products() {
///     println!("{} x{}", item.title, item.quantity);
/// }
/// ```
pub struct CartStore {
    storage: DeviceStore,
    storage_key: String,
    state: Mutex<Cart>,
    snapshot: watch::Sender<Vec<CartItem>>,
}

impl CartStore {
    /// Restore a cart store from device storage.
    ///
    /// An absent slot starts empty. A slot that no longer parses also starts
    /// empty: the unreadable snapshot is discarded with a warning instead of
    /// failing startup, and the next mutation overwrites it. I/O failures
    /// propagate.
    pub async fn load(storage: DeviceStore, config: StoreConfig) -> Result<Self, CartStoreError> {
        let StoreConfig { storage_key } = config;

        let items = match storage.get::<Vec<CartItem>>(&storage_key).await {
            Ok(Some(items)) => items,
            Ok(None) => Vec::new(),
            Err(StorageError::Serialize(err)) => {
                warn!(key = %storage_key, %err, "discarding malformed cart snapshot");
                Vec::new()
            }
            Err(err) => return Err(err.into()),
        };

        let cart = Cart::from_items(items);
        info!(key = %storage_key, items = cart.len(), "cart restored");

        let (snapshot, _) = watch::channel(cart.items().to_vec());
        Ok(Self {
            storage,
            storage_key,
            state: Mutex::new(cart),
            snapshot,
        })
    }

    /// Add a product to the cart and persist the result.
    ///
    /// A product whose id is already in the cart has its quantity
    /// incremented instead of being added twice.
    pub async fn add_to_cart(&self, product: Product) -> Result<(), CartStoreError> {
        let id = product.id.clone();
        let mut cart = self.state.lock().await;
        if cart.add(product) {
            debug!(%id, items = cart.len(), "item added");
        } else {
            debug!(%id, items = cart.len(), "existing item incremented");
        }
        self.commit(&cart).await
    }

    /// Increase the quantity of the matching item by one and persist.
    ///
    /// A miss leaves the collection untouched but still rewrites the slot,
    /// matching the historical storage contract.
    pub async fn increment(&self, id: &ProductId) -> Result<(), CartStoreError> {
        let mut cart = self.state.lock().await;
        if cart.increment(id) {
            debug!(%id, items = cart.len(), "item incremented");
        } else {
            debug!(%id, "increment miss; collection unchanged");
        }
        self.commit(&cart).await
    }

    /// Decrease the quantity of the matching item by one and persist; an
    /// item at quantity 1 is removed entirely.
    ///
    /// A miss behaves like [`increment`](Self::increment)'s miss.
    pub async fn decrement(&self, id: &ProductId) -> Result<(), CartStoreError> {
        let mut cart = self.state.lock().await;
        match cart.decrement(id) {
            DecrementOutcome::Decremented => debug!(%id, items = cart.len(), "item decremented"),
            DecrementOutcome::Removed => debug!(%id, items = cart.len(), "item removed"),
            DecrementOutcome::NotFound => debug!(%id, "decrement miss; collection unchanged"),
        }
        self.commit(&cart).await
    }

    /// Empty the cart and persist the empty collection.
    pub async fn clear(&self) -> Result<(), CartStoreError> {
        let mut cart = self.state.lock().await;
        cart.clear();
        debug!("cart cleared");
        self.commit(&cart).await
    }

    /// Write the current collection to storage without mutating it.
    ///
    /// Useful to retry after a mutation whose persist failed: memory keeps
    /// the applied mutation, so a successful flush converges storage.
    pub async fn flush(&self) -> Result<(), CartStoreError> {
        let cart = self.state.lock().await;
        self.commit(&cart).await
    }

    /// Current collection of line items, as an owned snapshot.
    ///
    /// Never blocks on storage I/O; serves the last published snapshot.
    pub fn products(&self) -> Vec<CartItem> {
        self.snapshot.borrow().clone()
    }

    /// Observe every post-mutation snapshot.
    ///
    /// The receiver starts at the current collection; await
    /// [`changed`](watch::Receiver::changed) to be notified of the next
    /// mutation.
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartItem>> {
        self.snapshot.subscribe()
    }

    /// Key the serialized collection is stored under.
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    // Called with the state lock held: publishes the post-mutation snapshot
    // to subscribers, then writes the same snapshot to storage.
    async fn commit(&self, cart: &Cart) -> Result<(), CartStoreError> {
        let items = cart.items().to_vec();
        self.snapshot.send_replace(items.clone());
        self.storage.set(&self.storage_key, &items).await?;
        Ok(())
    }
}
