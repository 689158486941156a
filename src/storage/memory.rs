//! In-process storage backend.

use super::{LocalStorage, StorageError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// `HashMap`-backed [`LocalStorage`].
///
/// Writes can be switched off with [`MemoryStorage::fail_writes`] to exercise
/// the "persist failed" paths.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// When `true`, every subsequent `set_item` fails with an I/O error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl LocalStorage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(std::io::Error::other("storage is read-only").into());
        }
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_and_failure_switch() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("k").await.unwrap(), None);

        storage.set_item("k", "v1").await.unwrap();
        storage.fail_writes(true);
        assert!(matches!(
            storage.set_item("k", "v2").await,
            Err(StorageError::Io(_))
        ));
        assert_eq!(storage.get_item("k").await.unwrap().as_deref(), Some("v1"));
    }
}
