//! Filesystem-backed object store
//!
//! A bucket is a directory under the configured root; object keys are
//! relative paths inside it. Writes go to a temporary sibling file that is
//! renamed over the target, so readers never see a half-written object.

use super::traits::ObjectStore;
use crate::domain::{Result, StorageError};
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};

/// Object store rooted at `{root}/{bucket}`
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    bucket_dir: PathBuf,
    name: String,
}

impl LocalObjectStore {
    pub fn new(root: impl AsRef<Path>, bucket: &str) -> Self {
        Self {
            bucket_dir: root.as_ref().join(bucket),
            name: format!("local:{bucket}"),
        }
    }

    pub fn bucket_dir(&self) -> &Path {
        &self.bucket_dir
    }

    /// Resolve a key to a path inside the bucket
    fn resolve(&self, key: &str) -> std::result::Result<PathBuf, StorageError> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey("key is empty".to_string()));
        }

        let relative = Path::new(key);
        for component in relative.components() {
            match component {
                Component::Normal(_) => {}
                _ => {
                    return Err(StorageError::InvalidKey(format!(
                        "key must be a relative path without '..': {key}"
                    )))
                }
            }
        }
        Ok(self.bucket_dir.join(relative))
    }
}

fn io_error(key: &str, err: std::io::Error) -> StorageError {
    if err.kind() == std::io::ErrorKind::NotFound {
        StorageError::NotFound(key.to_string())
    } else {
        StorageError::Io {
            key: key.to_string(),
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.resolve(key)?;
        let body = tokio::fs::read(&path)
            .await
            .map_err(|e| io_error(key, e))?;
        tracing::debug!(key = %key, bytes = body.len(), store = %self.name, "Object read");
        Ok(body)
    }

    async fn put(&self, key: &str, body: Vec<u8>) -> Result<()> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(key, e))?;
        }

        let mut tmp = path.clone().into_os_string();
        tmp.push(format!(".{}.tmp", uuid::Uuid::new_v4().simple()));
        let tmp = PathBuf::from(tmp);

        let bytes = body.len();
        if let Err(e) = tokio::fs::write(&tmp, body).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(io_error(key, e).into());
        }
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(io_error(key, e).into());
        }

        tracing::debug!(key = %key, bytes, store = %self.name, "Object written");
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let path = self.resolve(key)?;
        tokio::fs::try_exists(&path)
            .await
            .map_err(|e| io_error(key, e).into())
    }
}
