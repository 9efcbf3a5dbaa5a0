//! Tokenize / detokenize / mask pipeline
//!
//! # Architecture
//!
//! The pipeline consists of:
//! - **Dialect**: delimiter sniffing for input the pipeline did not produce
//! - **Codec**: delimited text <-> [`Table`](crate::domain::Table)
//! - **Encoder**: reversible, self-decodable cell tokens
//! - **Tokenize / Detokenize**: the two stages over PII columns
//! - **Masking**: field-kind display masks applied after decoding
//! - **Report / Audit**: per-file summaries and an append-only audit log
//!
//! # Usage
//!
//! ```rust
//! use veil::domain::PiiColumnSet;
//! use veil::pipeline::{codec, dialect, encoder::Base64Codec, tokenize::tokenize};
//!
//! let raw = "Name;Email\nJohn Doe;john@example.com\n";
//! let delimiter = dialect::sniff(raw)?;
//! let table = codec::parse(raw, delimiter)?;
//! let (tokenized, _) = tokenize(table, &PiiColumnSet::new(["Email"]), &Base64Codec::new())?;
//! assert_eq!(
//!     codec::serialize(&tokenized, delimiter)?,
//!     "Name;Email\nJohn Doe;am9obkBleGFtcGxlLmNvbQ==\n"
//! );
//! # Ok::<(), veil::domain::VeilError>(())
//! ```

pub mod audit;
pub mod codec;
pub mod detokenize;
pub mod dialect;
pub mod encoder;
pub mod masking;
pub mod report;
pub mod tokenize;

// Re-export main types
pub use detokenize::{CellOutcome, DecodeFailure, DetokenizeOptions, DetokenizeOutput};
pub use encoder::{Base64Codec, TokenCodec};
pub use masking::{FieldKinds, MaskRegistry};
pub use report::{Stage, StageReport};
pub use tokenize::TokenizeStats;
