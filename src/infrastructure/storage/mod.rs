//! Key-value persistence port.
//!
//! Every collection is stored as one JSON document under a fixed key. The
//! in-memory state of each repository stays authoritative; a failed write
//! is logged by the caller and never rolls anything back.

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

pub mod memory;
pub mod redis_store;

pub use memory::MemoryStore;
pub use redis_store::RedisStore;

pub const MOVIES_KEY: &str = "@admin_movies";
pub const SERIES_KEY: &str = "@admin_series";
pub const DISCOUNT_CODES_KEY: &str = "@discount_codes";

pub fn app_state_key(user_id: &str) -> String {
    format!("@app_state:{}", user_id)
}

pub fn subscription_key(user_id: &str) -> String {
    format!("@subscription_data_{}", user_id)
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set_item(&self, key: &str, value: String) -> Result<(), StorageError>;
    async fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

pub async fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.get_item(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

pub async fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    store.set_item(key, raw).await
}
