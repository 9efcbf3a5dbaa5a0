//! Per-invocation processing report
//!
//! Every processed file yields one [`StageReport`]. It is printed by the CLI,
//! written to the audit log, and returned to library callers.

use crate::pipeline::detokenize::DecodeFailure;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Tokenize,
    Detokenize,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tokenize => write!(f, "tokenize"),
            Self::Detokenize => write!(f, "detokenize"),
        }
    }
}

/// Summary of one file-processing invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageReport {
    pub invocation_id: Uuid,
    pub stage: Stage,
    pub base_name: String,
    /// Key the output was (or in dry-run mode, would have been) written to
    pub output_key: String,
    pub delimiter: String,
    pub rows: usize,
    pub columns: usize,
    /// Cells encoded (tokenize) or decoded (detokenize)
    pub cells_transformed: usize,
    pub cells_masked: usize,
    pub decode_failures: Vec<DecodeFailure>,
    pub unmatched_pii_columns: Vec<String>,
    pub masking_enabled: bool,
    pub dry_run: bool,
    pub duration_ms: u64,
}

impl StageReport {
    pub fn new(invocation_id: Uuid, stage: Stage, base_name: impl Into<String>) -> Self {
        Self {
            invocation_id,
            stage,
            base_name: base_name.into(),
            output_key: String::new(),
            delimiter: String::new(),
            rows: 0,
            columns: 0,
            cells_transformed: 0,
            cells_masked: 0,
            decode_failures: Vec::new(),
            unmatched_pii_columns: Vec::new(),
            masking_enabled: false,
            dry_run: false,
            duration_ms: 0,
        }
    }

    pub fn has_decode_failures(&self) -> bool {
        !self.decode_failures.is_empty()
    }

    /// One-line human summary
    pub fn summary_line(&self) -> String {
        let mut line = format!(
            "{} {} -> {} ({} rows, {} cells {}",
            self.stage,
            self.base_name,
            self.output_key,
            self.rows,
            self.cells_transformed,
            match self.stage {
                Stage::Tokenize => "encoded",
                Stage::Detokenize => "decoded",
            }
        );
        if self.stage == Stage::Detokenize {
            line.push_str(&format!(
                ", {} masked, {} decode failures",
                self.cells_masked,
                self.decode_failures.len()
            ));
        }
        line.push(')');
        if self.dry_run {
            line.push_str(" [dry run]");
        }
        line
    }
}
