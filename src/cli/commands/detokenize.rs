//! Detokenize command implementation
//!
//! Produces `detokenized/{B}_detokenized.csv` display copies. Masking follows
//! `masking.enabled` unless `--mask` or `--no-mask` is given.

use super::{build_processor, load_cli_config, report_results};
use crate::domain::{BaseName, VeilError};
use clap::Args;
use futures::future::join_all;
use std::path::Path;

/// Arguments for the detokenize command
#[derive(Args, Debug)]
pub struct DetokenizeArgs {
    /// Base names or tokenized object keys to detokenize
    #[arg(required = true, value_name = "BASE_OR_KEY")]
    pub targets: Vec<String>,

    /// Bucket to read from and write to (defaults to storage.bucket)
    #[arg(short, long)]
    pub bucket: Option<String>,

    /// Force display masking on
    #[arg(long, conflicts_with = "no_mask")]
    pub mask: bool,

    /// Force display masking off
    #[arg(long)]
    pub no_mask: bool,

    /// Run the pipeline without writing outputs
    #[arg(long)]
    pub dry_run: bool,
}

impl DetokenizeArgs {
    /// Masking flag after CLI overrides
    pub fn masking_enabled(&self, configured: bool) -> bool {
        if self.mask {
            true
        } else if self.no_mask {
            false
        } else {
            configured
        }
    }

    /// Execute the detokenize command
    pub async fn execute(&self, config_path: Option<&Path>) -> anyhow::Result<i32> {
        tracing::info!(count = self.targets.len(), "Starting detokenize command");

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

        let masking_enabled = self.masking_enabled(config.masking.enabled);
        tracing::info!(masking_enabled, "Display masking");

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

        let tasks = self.targets.iter().map(|input| {
            let processor = &processor;
            async move {
                let result = match BaseName::from_tokenized_key(input) {
                    Ok(base) => processor.detokenize_file(&base, masking_enabled).await,
                    Err(e) => Err(VeilError::Validation(e)),
                };
                (input.clone(), result)
            }
        });
        let results = join_all(tasks).await;

        Ok(report_results(&results))
    }
}
