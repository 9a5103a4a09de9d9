//! End-to-end tests for the persistent cart store.

use std::path::Path;

use gomarket_cart::prelude::*;
use gomarket_storage::DeviceStore;

fn product(id: &str) -> Product {
    Product::new(
        id,
        format!("Product {id}"),
        format!("https://cdn.example.com/{id}.png"),
        19.9,
    )
}

async fn open_store(dir: &Path) -> CartStore {
    let storage = DeviceStore::open(dir.join("storage.json")).await.unwrap();
    CartStore::load(storage, StoreConfig::default()).await.unwrap()
}

fn quantities(store: &CartStore) -> Vec<(String, u32)> {
    store
        .products()
        .iter()
        .map(|i| (i.id.to_string(), i.quantity))
        .collect()
}

#[tokio::test]
async fn test_add_increment_decrement_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(dir.path()).await;

    store.add_to_cart(product("a")).await.unwrap();
    assert_eq!(quantities(&store), vec![("a".to_string(), 1)]);

    store.add_to_cart(product("a")).await.unwrap();
    assert_eq!(quantities(&store), vec![("a".to_string(), 2)]);

    store.decrement(&ProductId::new("a")).await.unwrap();
    assert_eq!(quantities(&store), vec![("a".to_string(), 1)]);

    store.decrement(&ProductId::new("a")).await.unwrap();
    assert!(store.products().is_empty());
}

#[tokio::test]
async fn test_mutated_item_moves_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(dir.path()).await;

    store.add_to_cart(product("a")).await.unwrap();
    store.add_to_cart(product("b")).await.unwrap();
    store.increment(&ProductId::new("a")).await.unwrap();

    assert_eq!(
        quantities(&store),
        vec![("b".to_string(), 1), ("a".to_string(), 2)]
    );
}

#[tokio::test]
async fn test_reload_restores_collection() {
    let dir = tempfile::tempdir().unwrap();

    let store = open_store(dir.path()).await;
    store.add_to_cart(product("a")).await.unwrap();
    store.add_to_cart(product("b")).await.unwrap();
    store.increment(&ProductId::new("a")).await.unwrap();
    let mut before = quantities(&store);
    drop(store);

    let reloaded = open_store(dir.path()).await;
    let mut after = quantities(&reloaded);

    before.sort();
    after.sort();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_persisted_snapshot_is_post_mutation() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(dir.path()).await;

    store.add_to_cart(product("a")).await.unwrap();
    store.increment(&ProductId::new("a")).await.unwrap();

    // Read the slot through a fresh storage handle: the persisted bytes
    // must already contain the increment that just completed.
    let storage = DeviceStore::open(dir.path().join("storage.json")).await.unwrap();
    let persisted: Vec<CartItem> = storage
        .get(DEFAULT_STORAGE_KEY)
        .await
        .unwrap()
        .expect("slot must exist after a mutation");

    assert_eq!(persisted, store.products());
    assert_eq!(persisted[0].quantity, 2);
}

#[tokio::test]
async fn test_miss_still_persists_unchanged_collection() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(dir.path()).await;

    // No slot exists yet; a missed increment still writes one.
    store.increment(&ProductId::new("ghost")).await.unwrap();

    let storage = DeviceStore::open(dir.path().join("storage.json")).await.unwrap();
    let persisted: Option<Vec<CartItem>> = storage.get(DEFAULT_STORAGE_KEY).await.unwrap();
    assert_eq!(persisted, Some(Vec::new()));
}

#[tokio::test]
async fn test_malformed_slot_falls_back_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let storage = DeviceStore::open(&path).await.unwrap();
    storage
        .set_raw(DEFAULT_STORAGE_KEY, "definitely not a cart")
        .await
        .unwrap();

    let store = CartStore::load(storage, StoreConfig::default()).await.unwrap();
    assert!(store.products().is_empty());

    // The store is usable and the next mutation replaces the broken slot.
    store.add_to_cart(product("a")).await.unwrap();
    drop(store);

    let reloaded = open_store(dir.path()).await;
    assert_eq!(quantities(&reloaded), vec![("a".to_string(), 1)]);
}

#[tokio::test]
async fn test_subscribe_observes_mutations() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(dir.path()).await;
    let mut rx = store.subscribe();

    assert!(rx.borrow().is_empty());

    store.add_to_cart(product("a")).await.unwrap();
    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().len(), 1);

    store.clear().await.unwrap();
    rx.changed().await.unwrap();
    assert!(rx.borrow_and_update().is_empty());
}

#[tokio::test]
async fn test_custom_storage_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let storage = DeviceStore::open(&path).await.unwrap();
    let config = StoreConfig::new().with_storage_key("cart:test");
    let store = CartStore::load(storage, config).await.unwrap();

    store.add_to_cart(product("a")).await.unwrap();
    assert_eq!(store.storage_key(), "cart:test");

    let fresh = DeviceStore::open(&path).await.unwrap();
    assert!(fresh.exists("cart:test").await);
    assert!(!fresh.exists(DEFAULT_STORAGE_KEY).await);
}

#[tokio::test]
async fn test_flush_rewrites_current_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let store = open_store(dir.path()).await;
    store.add_to_cart(product("a")).await.unwrap();

    // Clobber the slot behind the store's back, then flush.
    let storage = DeviceStore::open(&path).await.unwrap();
    storage.set_raw(DEFAULT_STORAGE_KEY, "[]").await.unwrap();

    store.flush().await.unwrap();
    drop(store);

    let reloaded = open_store(dir.path()).await;
    assert_eq!(quantities(&reloaded), vec![("a".to_string(), 1)]);
}
