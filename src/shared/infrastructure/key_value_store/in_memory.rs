// In memory implementation of the KeyValueStore port.
//
// Purpose
// - Support store tests and local development without touching the disk.
//
// Responsibilities
// - Keep values per key in a map.
// - Record successful writes when built with `recording()`, so tests can assert write order.
// - Fail on demand: whole store offline, or writes to chosen keys only.

use crate::shared::infrastructure::key_value_store::{KeyValueStore, StorageError};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, RwLock};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    Set(String),
    Remove(String),
}

#[derive(Default)]
pub struct InMemoryKeyValueStore {
    inner: RwLock<HashMap<String, String>>,
    writes: Option<Mutex<Vec<WriteOp>>>,
    failing_keys: Mutex<HashSet<String>>,
    delay_ms: AtomicU64,
    is_offline: bool,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Like `new`, but keeps a log of every successful write.
    pub fn recording() -> Self {
        Self {
            writes: Some(Mutex::new(Vec::new())),
            ..Self::default()
        }
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    pub fn set_delay_ms(&self, ms: u64) {
        self.delay_ms.store(ms, Ordering::SeqCst);
    }

    pub async fn fail_writes_to(&self, key: &str) {
        self.failing_keys.lock().await.insert(key.to_string());
    }

    pub async fn clear_failures(&self) {
        self.failing_keys.lock().await.clear();
    }

    pub async fn writes(&self) -> Vec<WriteOp> {
        match &self.writes {
            Some(log) => log.lock().await.clone(),
            None => Vec::new(),
        }
    }

    async fn record(&self, op: WriteOp) {
        if let Some(log) = &self.writes {
            log.lock().await.push(op);
        }
    }

    /// Seed a raw value without recording a write, as if left by an earlier run.
    pub async fn seed(&self, key: &str, value: &str) {
        self.inner
            .write()
            .await
            .insert(key.to_string(), value.to_string());
    }

    async fn check_writable(&self, key: &str) -> Result<(), StorageError> {
        let delay = self.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
        }
        if self.is_offline {
            return Err(StorageError::Unavailable("Key value store offline".into()));
        }
        if self.failing_keys.lock().await.contains(key) {
            return Err(StorageError::Unavailable(format!("writes to {key} rejected")));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.is_offline {
            return Err(StorageError::Unavailable("Key value store offline".into()));
        }
        Ok(self.inner.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_writable(key).await?;
        self.inner
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        self.record(WriteOp::Set(key.to_string())).await;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check_writable(key).await?;
        self.inner.write().await.remove(key);
        self.record(WriteOp::Remove(key.to_string())).await;
        Ok(())
    }
}
