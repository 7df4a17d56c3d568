use std::{path::PathBuf, sync::Arc};
use tokio::fs;

use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::storage::snapshot_store::SnapshotStore;

/// File-backed snapshot store: one JSON file per key under a data
/// directory. Every write replaces the file wholesale, matching the
/// all-or-nothing snapshot contract.
#[derive(Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Initialize the store rooted at `dir`, creating it if missing.
    pub async fn new<P: Into<PathBuf>>(dir: P) -> Result<Arc<Self>, ServiceError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        Ok(Arc::new(Self { dir }))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl SnapshotStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ServiceError> {
        match fs::read(self.path_for(key)).await {
            Ok(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| ServiceError::Storage(e.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ServiceError::Storage(e.to_string())),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), ServiceError> {
        fs::write(self.path_for(key), value)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))
    }
}
