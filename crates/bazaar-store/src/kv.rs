//! Key-value store wrapper with automatic serialization.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::backend::{FileBackend, KvBackend, MemoryBackend};
use crate::StoreError;

/// Type-safe store over a [`KvBackend`].
///
/// Values are stored as JSON so any type implementing `Serialize` and
/// `DeserializeOwned` can be persisted. Cloning a `Store` shares the backend.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn KvBackend>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}

impl Store {
    /// Wrap an arbitrary backend.
    pub fn new(backend: impl KvBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Open a store that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Open a directory-backed store.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let store = Store::open_dir(".bazaar")?;
    /// ```
    pub fn open_dir(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Ok(Self::new(FileBackend::open(dir)?))
    }

    /// Get a value from the store.
    ///
    /// Returns `None` if the key doesn't exist.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.backend.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the store.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(value)?;
        self.backend.set(key, &bytes)
    }

    /// Delete a value from the store.
    pub fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.backend.delete(key)
    }

    /// Check if a key exists in the store.
    pub fn exists(&self, key: &str) -> Result<bool, StoreError> {
        self.backend.exists(key)
    }

    /// Get all keys in the store.
    pub fn keys(&self) -> Result<Vec<String>, StoreError> {
        self.backend.keys()
    }

    /// Read the raw bytes under `key`.
    pub fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.backend.get(key)
    }

    /// Write raw bytes under `key`, bypassing serialization.
    pub fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.backend.set(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Wallet {
        coins: u64,
    }

    #[test]
    fn test_typed_roundtrip() {
        let store = Store::in_memory();
        store.set("rewards", &Wallet { coins: 150 }).unwrap();

        let wallet: Option<Wallet> = store.get("rewards").unwrap();
        assert_eq!(wallet, Some(Wallet { coins: 150 }));
        assert!(store.exists("rewards").unwrap());
    }

    #[test]
    fn test_missing_key_is_none() {
        let store = Store::in_memory();
        let value: Option<Wallet> = store.get("nothing").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_corrupt_value_is_serialize_error() {
        let store = Store::in_memory();
        store.set_raw("rewards", b"not json").unwrap();

        let result: Result<Option<Wallet>, _> = store.get("rewards");
        assert!(matches!(result, Err(StoreError::SerializeError(_))));
    }

    #[test]
    fn test_clones_share_backend() {
        let store = Store::in_memory();
        let other = store.clone();
        store.set("k", &1u8).unwrap();
        assert_eq!(other.get::<u8>("k").unwrap(), Some(1));
    }
}
