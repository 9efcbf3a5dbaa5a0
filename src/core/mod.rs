//! Core orchestration for Veil.
//!
//! # Modules
//!
//! - [`processor`] - runs one stage for one base name against an object store
//! - [`event`] - object-arrival events and routing to a stage
//!
//! # Workflow
//!
//! 1. **Route**: a metadata object triggers tokenization, a tokenized object
//!    triggers detokenization, anything else is ignored
//! 2. **Fetch**: PII metadata and the input file (fatal on failure)
//! 3. **Transform**: sniff, parse, tokenize or detokenize, serialize
//! 4. **Publish**: one `put` of the complete output
//! 5. **Report**: log the [`StageReport`](crate::pipeline::StageReport) and
//!    append it to the audit log
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use veil::adapters::storage::LocalObjectStore;
//! use veil::core::processor::FileProcessor;
//! use veil::domain::BaseName;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(LocalObjectStore::new("./data", "veil"));
//! let processor = FileProcessor::new(store);
//!
//! let report = processor.tokenize_file(&BaseName::new("customer_data")?).await?;
//! println!("{}", report.summary_line());
//! # Ok(())
//! # }
//! ```

pub mod event;
pub mod processor;

pub use event::{route, ObjectEvent, ObjectRecord, Route};
pub use processor::{EventOutcome, FileProcessor};
