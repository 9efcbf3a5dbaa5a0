//! Tokenize command implementation
//!
//! Tokenizes `raw/{B}.csv` for one or more base names, concurrently.

use super::{build_processor, load_cli_config, report_results};
use crate::domain::keys::{METADATA_SUFFIX, RAW_SUFFIX};
use crate::domain::{BaseName, VeilError};
use clap::Args;
use futures::future::join_all;
use std::path::Path;

/// Arguments for the tokenize command
#[derive(Args, Debug)]
pub struct TokenizeArgs {
    /// Base names (or metadata / raw object keys) to tokenize
    #[arg(required = true, value_name = "BASE")]
    pub bases: Vec<String>,

    /// Bucket to read from and write to (defaults to storage.bucket)
    #[arg(short, long)]
    pub bucket: Option<String>,

    /// Run the pipeline without writing outputs
    #[arg(long)]
    pub dry_run: bool,
}

/// Base name from a bare name, a metadata key or a raw key
pub(crate) fn tokenize_target(input: &str) -> Result<BaseName, String> {
    if input.ends_with(METADATA_SUFFIX) {
        BaseName::from_metadata_key(input)
    } else if input.ends_with(RAW_SUFFIX) {
        BaseName::from_raw_key(input)
    } else {
        BaseName::new(input)
    }
}

impl TokenizeArgs {
    /// Execute the tokenize command
    pub async fn execute(&self, config_path: Option<&Path>) -> anyhow::Result<i32> {
        tracing::info!(count = self.bases.len(), "Starting tokenize command");

        let mut config = match load_cli_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
            println!("🔍 DRY RUN MODE - No files will be written");
            println!();
        }

        let bucket = self
            .bucket
            .clone()
            .unwrap_or_else(|| config.storage.bucket.clone());
        let processor = match build_processor(&config, &bucket) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let tasks = self.bases.iter().map(|input| {
            let processor = &processor;
            async move {
                let result = match tokenize_target(input) {
                    Ok(base) => processor.tokenize_file(&base).await,
                    Err(e) => Err(VeilError::Validation(e)),
                };
                (input.clone(), result)
            }
        });
        let results = join_all(tasks).await;

        Ok(report_results(&results))
    }
}
