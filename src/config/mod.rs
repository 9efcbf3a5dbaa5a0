//! Configuration management for Veil.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Veil uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `VEIL_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting, so the file itself is optional
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use veil::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("veil.toml")?;
//!
//! println!("Bucket: {}", config.storage.bucket);
//! println!("Masking enabled: {}", config.masking.enabled);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (name, log level, dry run)
//! - [`StorageConfig`] - Object store backend, root directory and bucket
//! - [`MaskingConfig`] - Display masking default and column-to-kind mapping
//! - [`AuditConfig`] - Audit log settings
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [storage]
//! backend = "local"
//! root = "./data"
//! bucket = "${VEIL_BUCKET}"
//!
//! [masking]
//! enabled = true
//!
//! [masking.field_kinds]
//! FullName = "name"
//! Mobile = "phone"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default};
pub use schema::{
    ApplicationConfig, AuditConfig, LoggingConfig, MaskingConfig, StorageBackend, StorageConfig,
    VeilConfig,
};

/// Serializes tests that read or write `VEIL_*` environment variables
#[cfg(test)]
pub(crate) static ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
