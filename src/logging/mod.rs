//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console logs on stderr
//! - Configurable log levels (`RUST_LOG` overrides the configured level)
//! - Local JSON file logging with rotation
//!
//! Token and plaintext cell values are never logged; decode fallbacks log
//! the row, column and reason only.
//!
//! # Example
//!
//! ```no_run
//! use veil::logging::init_logging;
//! use veil::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log the start of a stage for one base name
///
/// # Example
///
/// ```no_run
/// use veil::log_stage_start;
/// use veil::pipeline::Stage;
///
/// log_stage_start!(Stage::Tokenize, "customer_data");
/// ```
#[macro_export]
macro_rules! log_stage_start {
    ($stage:expr, $base_name:expr) => {
        tracing::info!(
            stage = %$stage,
            base_name = %$base_name,
            "Starting stage"
        )
    };
}

/// Log the completion of a stage from its report
///
/// # Example
///
/// ```no_run
/// use veil::log_stage_complete;
/// use veil::pipeline::{Stage, StageReport};
///
/// let report = StageReport::new(uuid::Uuid::new_v4(), Stage::Detokenize, "customer_data");
/// log_stage_complete!(&report);
/// ```
#[macro_export]
macro_rules! log_stage_complete {
    ($report:expr) => {
        tracing::info!(
            stage = %$report.stage,
            base_name = %$report.base_name,
            output_key = %$report.output_key,
            rows = $report.rows,
            cells_transformed = $report.cells_transformed,
            cells_masked = $report.cells_masked,
            decode_failures = $report.decode_failures.len(),
            dry_run = $report.dry_run,
            duration_ms = $report.duration_ms,
            "Stage completed"
        )
    };
}

/// Log a cell that kept its token because it could not be decoded
///
/// # Example
///
/// ```no_run
/// use veil::log_decode_fallback;
/// use veil::domain::DecodeError;
///
/// log_decode_fallback!(3, "Email", &DecodeError::InvalidUtf8);
/// ```
#[macro_export]
macro_rules! log_decode_fallback {
    ($row:expr, $column:expr, $error:expr) => {
        tracing::warn!(
            row = $row,
            column = %$column,
            reason = %$error,
            "Token could not be decoded, keeping it as-is"
        )
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use veil::log_error_with_context;
/// use veil::domain::VeilError;
///
/// let error = VeilError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::domain::{DecodeError, VeilError};
    use crate::pipeline::{Stage, StageReport};

    #[test]
    fn test_macros_expand_without_subscriber() {
        let report = StageReport::new(uuid::Uuid::new_v4(), Stage::Tokenize, "customer_data");
        crate::log_stage_start!(Stage::Tokenize, "customer_data");
        crate::log_stage_complete!(&report);
        crate::log_decode_fallback!(0usize, "Email", &DecodeError::InvalidUtf8);
        crate::log_error_with_context!(&VeilError::Other("boom".to_string()), "test");
    }

    #[test]
    fn test_macros_usable_in_expression_position() {
        let result: crate::domain::Result<()> = Err(VeilError::Other("boom".to_string()));
        let result = result.inspect_err(|e| crate::log_error_with_context!(e, "test"));
        assert!(result.is_err());

        let outcome = Some(DecodeError::InvalidUtf8)
            .map(|e| crate::log_decode_fallback!(1usize, "Email", &e));
        assert!(outcome.is_some());
    }
}
