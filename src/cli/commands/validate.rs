//! Validate config command implementation
//!
//! Loads the configuration file (with substitution and env overrides) and
//! prints a summary of the effective settings.

use super::DEFAULT_CONFIG_FILE;
use crate::config::load_config;
use clap::Args;
use std::path::Path;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: Option<&Path>) -> anyhow::Result<i32> {
        let path = config_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        tracing::info!(config_path = %path.display(), "Validating configuration");

        println!("🔍 Validating configuration file: {}", path.display());
        println!();

        let config = match load_config(path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Application: {}", config.application.name);
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!("  Storage Backend: {:?}", config.storage.backend);
        println!("  Storage Root: {}", config.storage.root.display());
        println!("  Bucket: {}", config.storage.bucket);
        println!("  Masking Enabled: {}", config.masking.enabled);
        if !config.masking.field_kinds.is_empty() {
            println!("  Field Kinds:");
            for (column, kind) in &config.masking.field_kinds {
                println!("    {column} -> {kind}");
            }
        }
        println!(
            "  Audit: {}",
            if config.audit.enabled {
                config.audit.log_path.display().to_string()
            } else {
                "disabled".to_string()
            }
        );
        println!();
        Ok(0)
    }
}
