use crate::errors::ServiceError;
use async_trait::async_trait;

/// Trait abstraction for durable snapshot storage.
/// Implementations can be file-backed, in-memory, or remote KV. Values are
/// whole JSON documents; there are no partial writes, so a failed `set`
/// leaves the previous snapshot intact.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Fetch the snapshot under `key`. `None` means the key was never
    /// written, which is not an error.
    async fn get(&self, key: &str) -> Result<Option<String>, ServiceError>;

    /// Replace the snapshot under `key` in full.
    async fn set(&self, key: &str, value: String) -> Result<(), ServiceError>;
}
