//! In-memory secret store.
//!
//! Backs the test suite and local development. Unlike the cubbyhole
//! client, `put_if_absent` here IS atomic: the check and the insert
//! happen under one write lock, which is what the provisioning race
//! tests rely on.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use zeroize::Zeroizing;

use crate::error::CustodyResult;
use crate::store::SecretStore;

/// In-process map of path → secret.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored secrets. Test helper.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl SecretStore for MemoryStore {
    async fn get(&self, path: &str) -> CustodyResult<Option<Zeroizing<String>>> {
        let entries = self.entries.read().await;
        Ok(entries.get(path).cloned().map(Zeroizing::new))
    }

    async fn put(&self, path: &str, value: &str) -> CustodyResult<()> {
        let mut entries = self.entries.write().await;
        entries.insert(path.to_string(), value.to_string());
        Ok(())
    }

    async fn put_if_absent(&self, path: &str, value: &str) -> CustodyResult<bool> {
        let mut entries = self.entries.write().await;
        if entries.contains_key(path) {
            return Ok(false);
        }
        entries.insert(path.to_string(), value.to_string());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_put_round_trip() {
        let store = MemoryStore::new();
        assert!(store.get("alice").await.unwrap().is_none());

        store.put("alice", "some words").await.unwrap();
        let value = store.get("alice").await.unwrap().unwrap();
        assert_eq!(&*value, "some words");
    }

    #[tokio::test]
    async fn test_put_if_absent_first_writer_wins() {
        let store = MemoryStore::new();
        assert!(store.put_if_absent("carol", "first").await.unwrap());
        assert!(!store.put_if_absent("carol", "second").await.unwrap());

        let value = store.get("carol").await.unwrap().unwrap();
        assert_eq!(&*value, "first");
        assert_eq!(store.len().await, 1);
    }
}
