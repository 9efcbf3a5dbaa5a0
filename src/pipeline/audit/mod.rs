//! Audit logging module
//!
//! Provides structured audit logging for processed files.

pub mod logger;

pub use logger::AuditLogger;
