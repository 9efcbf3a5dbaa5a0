//! Domain error types
//!
//! This module defines the error hierarchy for Veil. Fatal errors abort a whole
//! file-processing invocation; [`DecodeError`] is the only per-cell error and is
//! recovered inside the detokenization stage.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Veil error type
///
/// This is the primary error type used throughout the application. Any variant
/// returned from a processing invocation means no output artifact was written.
#[derive(Debug, Error)]
pub enum VeilError {
    /// PII column set could not be fetched or parsed
    #[error("PII metadata unavailable: {0}")]
    MetadataUnavailable(String),

    /// Delimiter could not be inferred
    #[error("Dialect error: {0}")]
    Dialect(#[from] DialectError),

    /// Header/row shape violations the parser does not tolerate
    #[error("Structural error: {0}")]
    Structural(String),

    /// Object store errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Delimiter detection errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialectError {
    /// The input has no non-empty line to sample
    #[error("no non-empty line to sample")]
    EmptySample,

    /// None of the candidate delimiters occurs on the sample line
    #[error("no candidate delimiter found in sample line: {0:?}")]
    NoCandidate(String),
}

/// Token decoding errors
///
/// Raised per cell during detokenization. The stage converts these into a
/// fallback outcome; they never abort a row or file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Token is not valid encoded output (alphabet, padding or length)
    #[error("invalid token encoding: {0}")]
    InvalidEncoding(String),

    /// Token decodes to bytes that are not valid UTF-8
    #[error("decoded token is not valid UTF-8")]
    InvalidUtf8,
}

/// Object store errors
///
/// These errors don't expose the underlying filesystem or SDK types.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Object does not exist
    #[error("Object not found: {0}")]
    NotFound(String),

    /// Key is empty, absolute or escapes the bucket
    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    /// Read or write failed
    #[error("Storage I/O failed for {key}: {message}")]
    Io { key: String, message: String },
}

impl VeilError {
    /// Short machine-readable kind, used in reports and exit handling
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MetadataUnavailable(_) => "metadata_unavailable",
            Self::Dialect(_) => "dialect",
            Self::Structural(_) => "structural",
            Self::Storage(_) => "storage",
            Self::Configuration(_) => "configuration",
            Self::Validation(_) => "validation",
            Self::Serialization(_) => "serialization",
            Self::Io(_) => "io",
            Self::Other(_) => "other",
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for VeilError {
    fn from(err: std::io::Error) -> Self {
        VeilError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for VeilError {
    fn from(err: serde_json::Error) -> Self {
        VeilError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for VeilError {
    fn from(err: toml::de::Error) -> Self {
        VeilError::Configuration(format!("TOML parse error: {err}"))
    }
}

// CSV reader errors are shape problems in the input
impl From<csv::Error> for VeilError {
    fn from(err: csv::Error) -> Self {
        VeilError::Structural(err.to_string())
    }
}
