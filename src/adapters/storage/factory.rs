//! Object store factory
//!
//! Creates the configured object store for a bucket.

use super::{InMemoryObjectStore, LocalObjectStore, ObjectStore};
use crate::config::{StorageBackend, StorageConfig};
use crate::domain::{Result, StorageError};
use std::sync::Arc;

/// Create an object store for `bucket` from configuration
///
/// # Errors
///
/// Returns an error if the bucket name is not a single path segment.
pub fn create_object_store(config: &StorageConfig, bucket: &str) -> Result<Arc<dyn ObjectStore>> {
    if bucket.trim().is_empty() || bucket.contains('/') || bucket.contains('\\') || bucket == ".." {
        return Err(StorageError::InvalidKey(format!("invalid bucket name: {bucket:?}")).into());
    }

    let store: Arc<dyn ObjectStore> = match config.backend {
        StorageBackend::Local => {
            tracing::info!(root = %config.root.display(), bucket = %bucket, "Creating local object store");
            Arc::new(LocalObjectStore::new(&config.root, bucket))
        }
        StorageBackend::Memory => {
            tracing::info!(bucket = %bucket, "Creating empty in-memory object store");
            Arc::new(InMemoryObjectStore::new())
        }
    };

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_local_store() {
        let config = StorageConfig::default();
        let store = create_object_store(&config, "pii-bucket").unwrap();
        assert_eq!(store.name(), "local:pii-bucket");
    }

    #[test]
    fn test_create_memory_store() {
        let config = StorageConfig {
            backend: StorageBackend::Memory,
            ..StorageConfig::default()
        };
        let store = create_object_store(&config, "any").unwrap();
        assert_eq!(store.name(), "memory");
    }

    #[test]
    fn test_rejects_bad_bucket() {
        let config = StorageConfig::default();
        assert!(create_object_store(&config, "../up").is_err());
        assert!(create_object_store(&config, "").is_err());
    }
}
