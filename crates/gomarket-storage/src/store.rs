//! File-backed key-value slots with automatic serialization.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, sync::RwLock};
use tracing::warn;

use crate::StorageError;

/// Device-local key-value storage backed by a single JSON file.
///
/// Keys are strings and values are stored as JSON text, mirroring the
/// stringly-typed contract of mobile device storage. All slots live in one
/// file that is rewritten wholesale on every write; there are no partial
/// updates and no versioning.
///
/// Cloning is cheap: clones share the same in-memory map and backing file.
#[derive(Clone)]
pub struct DeviceStore {
    slots: Arc<RwLock<HashMap<String, String>>>,
    file_path: PathBuf,
}

impl DeviceStore {
    /// Open storage at the given file path, creating parent directories as
    /// needed.
    ///
    /// A missing file starts empty. A malformed file also starts empty: the
    /// unreadable content is discarded with a warning rather than failing
    /// startup, and the next write replaces it.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let slots = match fs::read(&file_path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(map) => map,
                Err(err) => {
                    warn!(
                        path = %file_path.display(),
                        %err,
                        "discarding malformed storage file"
                    );
                    HashMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(err.into()),
        };

        Ok(Self {
            slots: Arc::new(RwLock::new(slots)),
            file_path,
        })
    }

    /// Get a value from storage, deserializing it from its JSON slot.
    ///
    /// Returns `None` if the key doesn't exist. A slot that exists but does
    /// not parse as `T` is a [`StorageError::Serialize`].
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let slots = self.slots.read().await;
        slots
            .get(key)
            .map(|text| serde_json::from_str(text))
            .transpose()
            .map_err(Into::into)
    }

    /// Serialize a value into its JSON slot and persist.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let text = serde_json::to_string(value)?;
        self.set_raw(key, text).await
    }

    /// Get the raw slot text without deserializing.
    pub async fn get_raw(&self, key: &str) -> Option<String> {
        let slots = self.slots.read().await;
        slots.get(key).cloned()
    }

    /// Store raw text under a key and persist.
    pub async fn set_raw(&self, key: &str, value: impl Into<String>) -> Result<(), StorageError> {
        let mut slots = self.slots.write().await;
        slots.insert(key.to_string(), value.into());
        drop(slots);
        self.save().await
    }

    /// Remove a key and persist; returns whether it existed.
    pub async fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let mut slots = self.slots.write().await;
        let existed = slots.remove(key).is_some();
        drop(slots);
        self.save().await?;
        Ok(existed)
    }

    /// Check if a key exists.
    pub async fn exists(&self, key: &str) -> bool {
        let slots = self.slots.read().await;
        slots.contains_key(key)
    }

    /// All keys currently in storage.
    pub async fn keys(&self) -> Vec<String> {
        let slots = self.slots.read().await;
        slots.keys().cloned().collect()
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    // Holds the read lock across the write so the file never lags behind a
    // slot update it was issued for.
    async fn save(&self) -> Result<(), StorageError> {
        let slots = self.slots.read().await;
        let data = serde_json::to_vec(&*slots)?;
        fs::write(&self.file_path, data).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage_path(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join("storage.json")
    }

    #[tokio::test]
    async fn test_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = DeviceStore::open(storage_path(&dir)).await.unwrap();

        assert!(storage.keys().await.is_empty());
        assert!(!storage.exists("anything").await);
    }

    #[tokio::test]
    async fn test_set_get_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = DeviceStore::open(storage_path(&dir)).await.unwrap();

        storage.set("numbers", &vec![1u32, 2, 3]).await.unwrap();

        let numbers: Option<Vec<u32>> = storage.get("numbers").await.unwrap();
        assert_eq!(numbers, Some(vec![1, 2, 3]));
        assert!(storage.exists("numbers").await);
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = storage_path(&dir);

        let storage = DeviceStore::open(&path).await.unwrap();
        storage.set("greeting", &"hello".to_string()).await.unwrap();

        let reopened = DeviceStore::open(&path).await.unwrap();
        let greeting: Option<String> = reopened.get("greeting").await.unwrap();
        assert_eq!(greeting.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn test_malformed_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = storage_path(&dir);
        tokio::fs::write(&path, b"{ this is not json").await.unwrap();

        let storage = DeviceStore::open(&path).await.unwrap();
        assert!(storage.keys().await.is_empty());

        // Writes still work and replace the broken file.
        storage.set("k", &42u8).await.unwrap();
        let reopened = DeviceStore::open(&path).await.unwrap();
        assert_eq!(reopened.get::<u8>("k").await.unwrap(), Some(42));
    }

    #[tokio::test]
    async fn test_malformed_slot_is_a_serialize_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = DeviceStore::open(storage_path(&dir)).await.unwrap();

        storage.set_raw("broken", "not json at all").await.unwrap();

        let result = storage.get::<Vec<u32>>("broken").await;
        assert!(matches!(result, Err(StorageError::Serialize(_))));
    }

    #[tokio::test]
    async fn test_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = DeviceStore::open(storage_path(&dir)).await.unwrap();

        storage.set("k", &1u8).await.unwrap();
        assert!(storage.remove("k").await.unwrap());
        assert!(!storage.remove("k").await.unwrap());
        assert!(!storage.exists("k").await);
    }
}
