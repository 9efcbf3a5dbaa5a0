//! Object storage adapters
//!
//! Provides the [`ObjectStore`] trait and its implementations:
//! - [`LocalObjectStore`]: one directory per bucket on the local filesystem
//! - [`InMemoryObjectStore`]: process-local map, for tests and trial runs

pub mod factory;
pub mod local;
pub mod memory;
pub mod traits;

pub use factory::create_object_store;
pub use local::LocalObjectStore;
pub use memory::InMemoryObjectStore;
pub use traits::ObjectStore;
