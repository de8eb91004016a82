use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::StoreError;
use crate::kv::{ClientProvider, KvClient};

/// Process-local store. Backs history when no Redis URL is configured
#[derive(Default)]
pub struct MemoryKv {
    entries: Mutex<HashMap<String, String>>,
    unreachable: AtomicBool,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation fail as if the store had gone away
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    /// Read a value without going through the async interface
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn check_reachable(&self) -> Result<(), StoreError> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(StoreError::Connection("memory store marked unreachable".to_string()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl KvClient for MemoryKv {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check_reachable()?;
        Ok(self.peek(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check_reachable()?;
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<u64, StoreError> {
        self.check_reachable()?;
        let removed = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(u64::from(removed.is_some()))
    }

    fn is_connected(&self) -> bool {
        !self.unreachable.load(Ordering::SeqCst)
    }
}

/// Always returns the same in-memory client
#[derive(Clone)]
pub struct MemoryProvider {
    client: Arc<MemoryKv>,
}

impl MemoryProvider {
    pub fn new(client: Arc<MemoryKv>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl ClientProvider for MemoryProvider {
    async fn client(&self) -> Result<Arc<dyn KvClient>, StoreError> {
        Ok(self.client.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_delete() {
        let kv = MemoryKv::new();
        assert_eq!(kv.get("k").await.unwrap(), None);

        kv.set("k", "v").await.unwrap();
        assert_eq!(kv.get("k").await.unwrap().as_deref(), Some("v"));

        assert_eq!(kv.delete("k").await.unwrap(), 1);
        assert_eq!(kv.delete("k").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unreachable_fails_every_operation() {
        let kv = MemoryKv::new();
        kv.set("k", "v").await.unwrap();
        kv.set_unreachable(true);

        assert!(!kv.is_connected());
        assert!(matches!(kv.get("k").await, Err(StoreError::Connection(_))));
        assert!(kv.set("k", "w").await.is_err());
        assert!(kv.delete("k").await.is_err());
        assert_eq!(kv.peek("k").as_deref(), Some("v"));
    }
}
