//! Handle-event command implementation
//!
//! Reads an object-arrival event (S3 notification JSON) from a file and runs
//! the stage each record routes to, against that record's bucket.

use super::{build_processor, load_cli_config};
use crate::core::event::ObjectEvent;
use clap::Args;
use std::path::{Path, PathBuf};

/// Arguments for the handle-event command
#[derive(Args, Debug)]
pub struct HandleEventArgs {
    /// Path to the event JSON file
    #[arg(value_name = "EVENT_JSON_FILE")]
    pub event_file: PathBuf,

    /// Run the pipeline without writing outputs
    #[arg(long)]
    pub dry_run: bool,
}

impl HandleEventArgs {
    /// Execute the handle-event command
    pub async fn execute(&self, config_path: Option<&Path>) -> anyhow::Result<i32> {
        tracing::info!(event_file = %self.event_file.display(), "Handling object event");

        let mut config = match load_cli_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(2); // Configuration error exit code
            }
        };
        if self.dry_run {
            config.application.dry_run = true;
        }

        let text = match tokio::fs::read_to_string(&self.event_file).await {
            Ok(t) => t,
            Err(e) => {
                eprintln!("❌ Failed to read {}: {e}", self.event_file.display());
                return Ok(5); // Fatal error exit code
            }
        };
        let event = match ObjectEvent::from_json_str(&text) {
            Ok(ev) => ev,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        if event.is_empty() {
            println!("No records in event");
            return Ok(0);
        }

        let mut failed = 0usize;
        let mut processed = 0usize;
        for (bucket, records) in event.by_bucket() {
            let processor = match build_processor(&config, bucket) {
                Ok(p) => p,
                Err(e) => {
                    println!("❌ bucket {bucket}: {e}");
                    failed += records.len();
                    continue;
                }
            };

            let sub_event = ObjectEvent {
                records: records.into_iter().cloned().collect(),
            };
            for outcome in processor.handle_event(&sub_event).await {
                match outcome.result {
                    Ok(Some(report)) => {
                        processed += 1;
                        println!("✅ {}", report.summary_line());
                    }
                    Ok(None) => println!("⏭️  {bucket}/{}: not a trigger object", outcome.key),
                    Err(e) => {
                        failed += 1;
                        println!("❌ {bucket}/{}: {e}", outcome.key);
                    }
                }
            }
        }

        println!();
        println!("Processed {processed} file(s), {failed} failed");

        Ok(if failed > 0 { 1 } else { 0 })
    }
}
