//! Domain models and types for Veil.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Tabular model** ([`Table`], [`Record`], [`Delimiter`])
//! - **Object naming** ([`BaseName`]) shared with downstream consumers
//! - **PII column set** ([`PiiColumnSet`]) loaded from classifier metadata
//! - **Error types** ([`VeilError`], [`DialectError`], [`DecodeError`], [`StorageError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, VeilError>`]:
//!
//! ```rust
//! use veil::domain::{PiiColumnSet, Result};
//!
//! fn example() -> Result<()> {
//!     let pii = PiiColumnSet::from_json_str(r#"["Name", "Email"]"#)?;
//!     assert!(pii.contains("Email"));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod errors;
pub mod keys;
pub mod pii_columns;
pub mod result;
pub mod table;

// Re-export commonly used types for convenience
pub use errors::{DecodeError, DialectError, StorageError, VeilError};
pub use keys::BaseName;
pub use pii_columns::PiiColumnSet;
pub use result::Result;
pub use table::{Delimiter, Record, Table};
