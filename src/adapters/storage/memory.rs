//! In-memory object store
//!
//! Used by tests and by the `memory` storage backend for trial runs.

use super::traits::ObjectStore;
use crate::domain::{Result, StorageError};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct InMemoryObjectStore {
    objects: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with objects
    pub fn with_objects<I, K, V>(objects: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Vec<u8>>,
    {
        Self {
            objects: RwLock::new(
                objects
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// All keys currently stored, sorted
    pub async fn keys(&self) -> Vec<String> {
        self.objects.read().await.keys().cloned().collect()
    }

    /// Object body as UTF-8 text, if present
    pub async fn get_text(&self, key: &str) -> Option<String> {
        self.objects
            .read()
            .await
            .get(key)
            .map(|body| String::from_utf8_lossy(body).into_owned())
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        self.objects
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()).into())
    }

    async fn put(&self, key: &str, body: Vec<u8>) -> Result<()> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey("key is empty".to_string()).into());
        }
        self.objects.write().await.insert(key.to_string(), body);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.objects.read().await.contains_key(key))
    }
}
