//! In-memory credential store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::Result;
use crate::traits::TokenStore;

/// A [`TokenStore`] that keeps values in process memory.
///
/// Clones share the same map, so a clone handed to a second client behaves
/// like the same durable storage seen from two processes.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored values.
    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }

    /// True if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.values.read().await.is_empty()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.values.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_remove() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.get("access_token").await.unwrap(), None);

        store.set("access_token", "abc").await.unwrap();
        assert_eq!(
            store.get("access_token").await.unwrap().as_deref(),
            Some("abc")
        );

        store.remove("access_token").await.unwrap();
        store.remove("access_token").await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = MemoryTokenStore::new();
        let other = store.clone();
        store.set("refresh_token", "r").await.unwrap();
        assert_eq!(other.get("refresh_token").await.unwrap().as_deref(), Some("r"));
        assert_eq!(other.len().await, 1);
    }

    #[tokio::test]
    async fn usable_as_trait_object() {
        let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
        store.set("k", "v").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
    }
}
