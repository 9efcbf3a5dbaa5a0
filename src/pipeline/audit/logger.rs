//! Audit logger for tokenization and detokenization runs

use crate::pipeline::report::StageReport;
use anyhow::{Context, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

/// Audit log entry
#[derive(Debug, Serialize)]
struct AuditLogEntry {
    timestamp: String,
    invocation_id: String,
    stage: String,
    base_name: String,
    output_key: String,
    rows: usize,
    cells_transformed: usize,
    cells_masked: usize,
    masking_enabled: bool,
    dry_run: bool,
    duration_ms: u64,
    decode_failures: Vec<AuditDecodeFailure>,
}

/// Decode failure entry (with hashed token)
#[derive(Debug, Serialize)]
struct AuditDecodeFailure {
    row: usize,
    column: String,
    reason: String,
    /// SHA-256 hash of the undecodable token (never log the token itself)
    token_hash: String,
}

/// Appends one entry per processed file
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
    // serializes appends from concurrent invocations
    write_lock: Mutex<()>,
}

impl AuditLogger {
    /// Create a new audit logger, creating the log directory if needed
    pub fn new(log_path: PathBuf, json_format: bool) -> Result<Self> {
        if let Some(parent) = log_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create audit log directory: {}", parent.display())
                })?;
            }
        }

        Ok(Self {
            log_path,
            json_format,
            write_lock: Mutex::new(()),
        })
    }

    pub fn log_path(&self) -> &PathBuf {
        &self.log_path
    }

    /// Log a finished stage
    pub fn log_report(&self, report: &StageReport) -> Result<()> {
        let entry = AuditLogEntry {
            timestamp: chrono::Utc::now().to_rfc3339(),
            invocation_id: report.invocation_id.to_string(),
            stage: report.stage.to_string(),
            base_name: report.base_name.clone(),
            output_key: report.output_key.clone(),
            rows: report.rows,
            cells_transformed: report.cells_transformed,
            cells_masked: report.cells_masked,
            masking_enabled: report.masking_enabled,
            dry_run: report.dry_run,
            duration_ms: report.duration_ms,
            decode_failures: report
                .decode_failures
                .iter()
                .map(|f| AuditDecodeFailure {
                    row: f.row,
                    column: f.column.clone(),
                    reason: f.reason.clone(),
                    token_hash: hash_value(&f.token),
                })
                .collect(),
        };

        self.write_entry(&entry)
    }

    /// Write an audit entry to the log file
    fn write_entry(&self, entry: &AuditLogEntry) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow::anyhow!("Audit log lock poisoned"))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open audit log: {}", self.log_path.display()))?;

        if self.json_format {
            let json_line =
                serde_json::to_string(entry).context("Failed to serialize audit entry")?;
            writeln!(file, "{json_line}").context("Failed to write audit entry")?;
        } else {
            writeln!(
                file,
                "[{}] {} {} | Output: {} | Rows: {} | Cells: {} | Masked: {} | Decode failures: {} | Time: {}ms",
                entry.timestamp,
                entry.stage,
                entry.base_name,
                entry.output_key,
                entry.rows,
                entry.cells_transformed,
                entry.cells_masked,
                entry.decode_failures.len(),
                entry.duration_ms
            )
            .context("Failed to write audit entry")?;
        }

        Ok(())
    }
}

/// Hash a value using SHA-256
fn hash_value(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let result = hasher.finalize();
    format!("{result:x}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::detokenize::DecodeFailure;
    use crate::pipeline::report::Stage;
    use tempfile::tempdir;
    use uuid::Uuid;

    fn report_with_failure() -> StageReport {
        let mut report = StageReport::new(Uuid::new_v4(), Stage::Detokenize, "customers");
        report.output_key = "detokenized/customers_detokenized.csv".to_string();
        report.decode_failures.push(DecodeFailure {
            row: 4,
            column: "Email".to_string(),
            reason: "invalid token encoding".to_string(),
            token: "bm90LWEtdG9rZW4hIQ%%".to_string(),
        });
        report
    }

    #[test]
    fn test_hash_value() {
        let hash1 = hash_value("c2VjcmV0");
        let hash2 = hash_value("c2VjcmV0");
        let hash3 = hash_value("b3RoZXI=");
        assert_eq!(hash1, hash2);
        assert_ne!(hash1, hash3);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_log_report_json() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit").join("veil.log");
        let logger = AuditLogger::new(log_path.clone(), true).unwrap();

        logger.log_report(&report_with_failure()).unwrap();
        logger.log_report(&report_with_failure()).unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("customers"));
        assert!(content.contains("token_hash"));
        // Should NOT contain the raw token
        assert!(!content.contains("bm90LWEtdG9rZW4hIQ%%"));

        let first: serde_json::Value = serde_json::from_str(content.lines().next().unwrap()).unwrap();
        assert_eq!(first["stage"], "detokenize");
        assert_eq!(first["decode_failures"][0]["row"], 4);
    }

    #[test]
    fn test_log_report_plain_text() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("veil.log");
        let logger = AuditLogger::new(log_path.clone(), false).unwrap();

        logger.log_report(&report_with_failure()).unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("detokenize customers"));
        assert!(content.contains("Decode failures: 1"));
    }
}
