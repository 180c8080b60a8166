use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{KeyValueStore, StorageError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.items.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.write().await.remove(key);
        Ok(())
    }
}

/// Store whose first write stalls, so a later write could overtake it.
#[cfg(test)]
pub(crate) struct SlowFirstWrite {
    inner: MemoryStore,
    stalled: std::sync::atomic::AtomicBool,
}

#[cfg(test)]
impl SlowFirstWrite {
    pub(crate) fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            stalled: std::sync::atomic::AtomicBool::new(false),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl KeyValueStore for SlowFirstWrite {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key).await
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), StorageError> {
        if !self.stalled.swap(true, std::sync::atomic::Ordering::SeqCst) {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        }
        self.inner.set_item(key, value).await
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove_item(key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::{load_json, save_json};

    #[tokio::test]
    async fn round_trips_items() {
        let store = MemoryStore::new();
        assert_eq!(store.get_item("k").await.unwrap(), None);

        store.set_item("k", "v".to_string()).await.unwrap();
        assert_eq!(store.get_item("k").await.unwrap().as_deref(), Some("v"));

        store.remove_item("k").await.unwrap();
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn load_json_reports_corrupt_documents() {
        let store = MemoryStore::new();
        store.set_item("bad", "{not json".to_string()).await.unwrap();

        let loaded: Result<Option<Vec<String>>, _> = load_json(&store, "bad").await;
        assert!(loaded.is_err());

        save_json(&store, "good", &vec!["a".to_string()]).await.unwrap();
        let loaded: Option<Vec<String>> = load_json(&store, "good").await.unwrap();
        assert_eq!(loaded, Some(vec!["a".to_string()]));
    }
}
