//! CLI command implementations
//!
//! Exit codes shared by every command:
//! - `0` success
//! - `1` one or more files failed
//! - `2` configuration error
//! - `5` fatal error

pub mod detokenize;
pub mod handle_event;
pub mod init;
pub mod tokenize;
pub mod validate;

use crate::adapters::storage::create_object_store;
use crate::config::{load_config, load_config_or_default, StorageBackend, VeilConfig};
use crate::core::processor::FileProcessor;
use crate::domain::{Result, VeilError};
use crate::pipeline::StageReport;
use std::path::Path;

/// Configuration file used when `--config` is not given and it exists
pub const DEFAULT_CONFIG_FILE: &str = "veil.toml";

/// Load configuration for a processing command
///
/// An explicit path must exist. Without one, `veil.toml` in the working
/// directory is used if present, otherwise built-in defaults.
pub fn load_cli_config(config_path: Option<&Path>) -> Result<VeilConfig> {
    match config_path {
        Some(path) => load_config(path),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => load_config(DEFAULT_CONFIG_FILE),
        None => load_config_or_default(None),
    }
}

/// Processor for `bucket` built from configuration
///
/// The `memory` backend starts empty in every process, so a command run
/// against it could only report missing objects.
pub(crate) fn build_processor(config: &VeilConfig, bucket: &str) -> Result<FileProcessor> {
    if config.storage.backend == StorageBackend::Memory {
        return Err(VeilError::Configuration(
            "storage.backend \"memory\" holds no objects between runs; use \"local\" for CLI commands"
                .to_string(),
        ));
    }
    let store = create_object_store(&config.storage, bucket)?;
    FileProcessor::from_config(config, store)
}

/// Print one line per processed file and return the exit code
pub(crate) fn report_results(results: &[(String, Result<StageReport>)]) -> i32 {
    let mut failed = 0usize;
    for (target, result) in results {
        match result {
            Ok(report) => {
                println!("✅ {}", report.summary_line());
                for failure in &report.decode_failures {
                    println!(
                        "   ⚠️  row {} column {}: {}",
                        failure.row, failure.column, failure.reason
                    );
                }
            }
            Err(e) => {
                failed += 1;
                println!("❌ {target}: {e}");
            }
        }
    }

    println!();
    println!(
        "Processed {} file(s): {} succeeded, {} failed",
        results.len(),
        results.len() - failed,
        failed
    );

    if failed > 0 {
        1
    } else {
        0
    }
}
