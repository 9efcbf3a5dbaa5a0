//! External system integrations for Veil.
//!
//! - [`storage`] - object store abstraction (trait-based) with local
//!   filesystem and in-memory implementations
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies and
//! enable testing with in-memory implementations. The pipeline only sees the
//! [`storage::ObjectStore`] trait; the factory picks the backend from
//! configuration.
//!
//! ```rust,no_run
//! use veil::adapters::storage::create_object_store;
//! use veil::config::StorageConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = create_object_store(&StorageConfig::default(), "veil")?;
//! let body = store.get("metadata/customer_data_pii_fields.json").await?;
//! # Ok(())
//! # }
//! ```

pub mod storage;
