//! Key/value persistence for favorites and the last search
//!
//! Values are JSON text blobs stored under short flat keys. Readers treat a
//! missing or unparsable value as "nothing saved"; see [`load_json`].

use crate::error::StorageError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::RwLock;

/// Result type for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Storage key holding the favorites array
pub const FAVORITES_KEY: &str = "favoriteBooks";

/// Storage key holding the last-search snapshot
pub const LAST_SEARCH_KEY: &str = "lastBookSearch";

/// Abstract key/value store
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Read the value under `key`; `NotFound` when absent
    async fn read(&self, key: &str) -> StorageResult<Vec<u8>>;

    /// Replace the value under `key`
    async fn write(&self, key: &str, data: Vec<u8>) -> StorageResult<()>;

    /// Remove the value under `key`; `NotFound` when absent
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Check if a value exists under `key`
    async fn exists(&self, key: &str) -> StorageResult<bool>;
}

/// Read and decode a JSON value, treating every failure as "nothing saved"
pub async fn load_json<T: DeserializeOwned>(storage: &dyn StorageProvider, key: &str) -> Option<T> {
    let bytes = match storage.read(key).await {
        Ok(bytes) => bytes,
        Err(StorageError::NotFound(_)) => return None,
        Err(e) => {
            tracing::warn!("Failed to read '{}', ignoring saved value: {}", key, e);
            return None;
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(value) => Some(value),
        Err(e) => {
            let err = StorageError::Corrupt {
                key: key.to_string(),
                reason: e.to_string(),
            };
            tracing::warn!("{}; starting fresh", err);
            None
        }
    }
}

/// Encode and write a JSON value
pub async fn save_json<T: Serialize + ?Sized>(
    storage: &dyn StorageProvider,
    key: &str,
    value: &T,
) -> StorageResult<()> {
    let data = serde_json::to_vec(value).map_err(|e| StorageError::BackendError(e.to_string()))?;
    storage.write(key, data).await
}

/// Local filesystem storage: one `<key>.json` file per key under a root directory
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    /// Create a new local storage provider with the given root directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// Resolve a key to its file, rejecting anything that is not a flat name
    fn full_path(&self, key: &str) -> StorageResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl StorageProvider for LocalStorage {
    async fn read(&self, key: &str) -> StorageResult<Vec<u8>> {
        let full_path = self.full_path(key)?;
        match tokio::fs::read(full_path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(StorageError::BackendError(e.to_string())),
        }
    }

    /// Writes to a temp file then renames, so readers never see a partial value
    async fn write(&self, key: &str, data: Vec<u8>) -> StorageResult<()> {
        let full_path = self.full_path(key)?;
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))?;

        let temp_path = full_path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, data)
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))?;
        tokio::fs::rename(&temp_path, &full_path)
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let full_path = self.full_path(key)?;
        match tokio::fs::remove_file(full_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(StorageError::BackendError(e.to_string())),
        }
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let full_path = self.full_path(key)?;
        tokio::fs::try_exists(full_path)
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))
    }
}

/// In-memory storage provider (for testing)
#[derive(Default)]
pub struct MemoryStorage {
    data: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageProvider for MemoryStorage {
    async fn read(&self, key: &str) -> StorageResult<Vec<u8>> {
        self.data
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn write(&self, key: &str, data: Vec<u8>) -> StorageResult<()> {
        self.data.write().await.insert(key.to_string(), data);
        Ok(())
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.data
            .write()
            .await
            .remove(key)
            .ok_or_else(|| StorageError::NotFound(key.to_string()))?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.data.read().await.contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_memory_storage() {
        let storage = MemoryStorage::new();

        storage.write("k", b"hello".to_vec()).await.unwrap();
        assert_eq!(storage.read("k").await.unwrap(), b"hello");
        assert!(storage.exists("k").await.unwrap());

        storage.delete("k").await.unwrap();
        assert!(!storage.exists("k").await.unwrap());
        assert!(matches!(
            storage.read("k").await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_local_storage_roundtrip() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().join("nested"));

        storage.write(FAVORITES_KEY, b"[]".to_vec()).await.unwrap();
        assert!(dir.path().join("nested/favoriteBooks.json").exists());
        assert!(!dir.path().join("nested/favoriteBooks.json.tmp").exists());
        assert_eq!(storage.read(FAVORITES_KEY).await.unwrap(), b"[]");

        storage.delete(FAVORITES_KEY).await.unwrap();
        assert!(matches!(
            storage.delete(FAVORITES_KEY).await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_local_storage_rejects_path_keys() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        for key in ["../escape", "a/b", "", "."] {
            assert!(matches!(
                storage.read(key).await,
                Err(StorageError::InvalidKey(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_load_json_swallows_corrupt_values() {
        let storage = MemoryStorage::new();
        storage.write("bad", b"{not json".to_vec()).await.unwrap();

        let loaded: Option<Vec<String>> = load_json(&storage, "bad").await;
        assert!(loaded.is_none());

        let missing: Option<Vec<String>> = load_json(&storage, "missing").await;
        assert!(missing.is_none());

        save_json(&storage, "good", &vec!["a".to_string()]).await.unwrap();
        let loaded: Option<Vec<String>> = load_json(&storage, "good").await;
        assert_eq!(loaded, Some(vec!["a".to_string()]));
    }
}
