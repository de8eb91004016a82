use std::sync::Arc;

use crate::error::StoreError;

/// Minimal key-value capability the history store needs
#[async_trait::async_trait]
pub trait KvClient: Send + Sync {
    /// Value under `key`, `None` when absent
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the value under `key`
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`, returning how many keys were deleted
    async fn delete(&self, key: &str) -> Result<u64, StoreError>;

    /// Whether the underlying connection is believed to be usable
    fn is_connected(&self) -> bool;
}

/// Hands out a ready client, connecting on demand
#[async_trait::async_trait]
pub trait ClientProvider: Send + Sync {
    async fn client(&self) -> Result<Arc<dyn KvClient>, StoreError>;
}
