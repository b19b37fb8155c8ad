// Key value persistence port.
//
// Purpose
// - Describe the durable string store the bookmark store mirrors its collections into.
//
// Boundaries
// - Values are opaque strings. The port knows nothing about bookmarks.
// - No multi-key transactions. Each set is atomic for its own key only.
//
// Testing guidance
// - Use InMemoryKeyValueStore and its failure switches to drive error paths.

pub mod file_system;
pub mod in_memory;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("io error on key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
