//! Configuration schema types
//!
//! Every section is optional; an empty file is a valid configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Object store backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Directory per bucket on the local filesystem
    #[default]
    Local,
    /// Process-local map that starts empty; for library embedding and tests,
    /// rejected by the CLI commands
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "memory" => Ok(Self::Memory),
            _ => Err(format!(
                "Invalid storage backend '{s}'. Must be one of: local, memory"
            )),
        }
    }
}

/// Main Veil configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VeilConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Object store settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Display masking settings
    #[serde(default)]
    pub masking: MaskingConfig,

    /// Audit log settings
    #[serde(default)]
    pub audit: AuditConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl VeilConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.storage.validate()?;
        self.masking.validate()?;
        self.audit.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name
    #[serde(default = "default_name")]
    pub name: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Run the pipeline but never write outputs
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid application.log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Object store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend (local or memory)
    #[serde(default)]
    pub backend: StorageBackend,

    /// Root directory holding one directory per bucket (local backend)
    #[serde(default = "default_storage_root")]
    pub root: PathBuf,

    /// Bucket used when a command or event does not name one
    #[serde(default = "default_bucket")]
    pub bucket: String,
}

impl StorageConfig {
    fn validate(&self) -> Result<(), String> {
        if self.bucket.trim().is_empty() {
            return Err("storage.bucket cannot be empty".to_string());
        }
        if self.bucket.contains('/') || self.bucket.contains('\\') || self.bucket == ".." {
            return Err(format!(
                "storage.bucket must be a single path segment: {}",
                self.bucket
            ));
        }
        if self.backend == StorageBackend::Local && self.root.as_os_str().is_empty() {
            return Err("storage.root cannot be empty for the local backend".to_string());
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Local,
            root: default_storage_root(),
            bucket: default_bucket(),
        }
    }
}

/// Display masking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaskingConfig {
    /// Mask revealed values by field kind (default: enabled)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Column name -> field kind overrides, e.g. `FullName = "name"`
    #[serde(default)]
    pub field_kinds: BTreeMap<String, String>,
}

impl MaskingConfig {
    fn validate(&self) -> Result<(), String> {
        for (column, kind) in &self.field_kinds {
            if column.trim().is_empty() || kind.trim().is_empty() {
                return Err(format!(
                    "masking.field_kinds entries need a column and a kind: {column:?} = {kind:?}"
                ));
            }
        }
        Ok(())
    }
}

impl Default for MaskingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            field_kinds: BTreeMap::new(),
        }
    }
}

/// Audit log configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable audit logging
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,

    /// Use JSON format for audit logs
    #[serde(default = "default_true")]
    pub json_format: bool,
}

impl AuditConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled && self.log_path.as_os_str().is_empty() {
            return Err("audit.log_path cannot be empty when audit is enabled".to_string());
        }
        Ok(())
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
            json_format: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily or hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_name() -> String {
    "veil".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_storage_root() -> PathBuf {
    PathBuf::from("./data")
}

fn default_bucket() -> String {
    "veil".to_string()
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/veil-audit.log")
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = VeilConfig::default();
        assert_eq!(config.application.log_level, "info");
        assert!(!config.application.dry_run);
        assert_eq!(config.storage.backend, StorageBackend::Local);
        assert_eq!(config.storage.bucket, "veil");
        assert!(config.masking.enabled);
        assert!(!config.audit.enabled);
        assert!(!config.logging.local_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_valid() {
        let config: VeilConfig = toml::from_str("").unwrap();
        assert!(config.masking.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_masking_section_defaults_enabled() {
        let config: VeilConfig = toml::from_str("[masking]\n").unwrap();
        assert!(config.masking.enabled);

        let config: VeilConfig = toml::from_str("[masking]\nenabled = false\n").unwrap();
        assert!(!config.masking.enabled);
    }

    #[test]
    fn test_field_kinds_table() {
        let config: VeilConfig =
            toml::from_str("[masking.field_kinds]\nFullName = \"name\"\nMobile = \"phone\"\n")
                .unwrap();
        assert_eq!(config.masking.field_kinds.get("FullName").unwrap(), "name");
        assert_eq!(config.masking.field_kinds.len(), 2);
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());
        config.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_storage_config_validation() {
        let mut config = StorageConfig::default();
        config.bucket = "a/b".to_string();
        assert!(config.validate().is_err());
        config.bucket = " ".to_string();
        assert!(config.validate().is_err());
        config.bucket = "ok".to_string();
        config.root = PathBuf::new();
        assert!(config.validate().is_err());
        config.backend = StorageBackend::Memory;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_logging_config_validation() {
        let mut config = LoggingConfig::default();
        config.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_storage_backend_from_str() {
        assert_eq!("LOCAL".parse::<StorageBackend>().unwrap(), StorageBackend::Local);
        assert_eq!("memory".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
        assert!("s3".parse::<StorageBackend>().is_err());
    }
}
