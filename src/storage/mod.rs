//! Key-value persistence used by the store.
//!
//! The store writes four independent JSON records. Backends only need to
//! move opaque strings in and out; encoding stays in the store.

use async_trait::async_trait;
use thiserror::Error;

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors that can occur when reading or writing persisted records.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode or decode record: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Persisted state has not been loaded yet")]
    NotLoaded,
}

/// Asynchronous string key-value storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if nothing was stored.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;
}

/// Names of the four persisted records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub created_recipes: String,
    pub saved_recipes: String,
    pub comments: String,
    pub liked_recipes: String,
}

impl StorageKeys {
    pub fn with_prefix(prefix: &str) -> Self {
        StorageKeys {
            created_recipes: format!("{prefix}createdRecipes"),
            saved_recipes: format!("{prefix}savedRecipes"),
            comments: format!("{prefix}comments"),
            liked_recipes: format!("{prefix}likedRecipes"),
        }
    }
}
