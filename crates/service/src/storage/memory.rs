use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};
use tokio::sync::RwLock;

use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::storage::snapshot_store::SnapshotStore;

/// In-memory snapshot store for tests and ephemeral runs.
///
/// `poison()` flips every subsequent operation into a storage failure so
/// callers can exercise the persistence-error path without a real broken
/// disk.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<HashMap<String, String>>,
    poisoned: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn poison(&self) {
        self.poisoned.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), ServiceError> {
        if self.poisoned.load(Ordering::SeqCst) {
            return Err(ServiceError::Storage("storage unavailable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl SnapshotStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ServiceError> {
        self.check()?;
        Ok(self.inner.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), ServiceError> {
        self.check()?;
        self.inner.write().await.insert(key.to_string(), value);
        Ok(())
    }
}
