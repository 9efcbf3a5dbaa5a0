//! Object store abstraction
//!
//! The pipeline only ever reads whole objects and writes whole objects. A
//! `put` must either publish the complete body or nothing.

use crate::domain::Result;
use async_trait::async_trait;

/// Object store client trait
///
/// Implementations are shared across concurrent invocations behind an `Arc`.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Human-readable store name for logs
    fn name(&self) -> &str;

    /// Read a whole object
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::StorageError::NotFound`] if the key does not
    /// exist.
    async fn get(&self, key: &str) -> Result<Vec<u8>>;

    /// Write a whole object, replacing any existing one
    async fn put(&self, key: &str, body: Vec<u8>) -> Result<()>;

    /// Check whether a key exists
    async fn exists(&self, key: &str) -> Result<bool>;
}
