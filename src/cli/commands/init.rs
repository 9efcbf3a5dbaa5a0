//! Init command implementation
//!
//! Writes a commented sample configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "veil.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Veil configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your bucket and storage root", self.output);
                println!("  2. Validate configuration: veil validate-config");
                println!("  3. Tokenize a file: veil tokenize <BASE>");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Sample configuration with every setting at its default
    fn generate_config() -> String {
        r#"# Veil Configuration File
# PII tokenization pipeline for delimited files
#
# Object layout inside a bucket, for base name B:
#   metadata/B_pii_fields.json   JSON array of PII column names
#   raw/B.csv                    raw input
#   tokenized/B_tokenized.csv    tokenized output
#   detokenized/B_detokenized.csv display output

[application]
name = "veil"

# Log level (trace, debug, info, warn, error)
log_level = "info"

# Run the pipeline without writing outputs
dry_run = false

[storage]
# Backend: local (directory per bucket under root). "memory" starts empty and
# is only useful when embedding the library; CLI commands reject it.
backend = "local"
root = "./data"

# Default bucket; values can reference the environment, e.g. "${VEIL_BUCKET}"
bucket = "veil"

[masking]
# Mask revealed values by field kind when detokenizing
enabled = true

# Column name -> field kind (name, email, phone). Columns not listed use
# their own lower-cased name as the kind.
[masking.field_kinds]
# FullName = "name"
# Mobile = "phone"

[audit]
enabled = false
log_path = "./audit/veil-audit.log"
json_format = true

[logging]
local_enabled = false
local_path = "./logs"

# Log rotation (daily or hourly)
local_rotation = "daily"
"#
        .to_string()
    }
}
