// Veil - PII Tokenization Pipeline
// Copyright (c) 2025 Veil Contributors
// Licensed under the MIT License

//! # Veil - PII tokenization for delimited files
//!
//! Veil reversibly tokenizes the PII columns of CSV-like files and produces
//! masked display copies on demand.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Sniffing** the delimiter of raw input (`,` `;` tab `|`)
//! - **Tokenizing** the cells of columns named by classifier metadata
//! - **Detokenizing** tokens back to values, with field-kind display masking
//! - **Routing** object-arrival events to the right stage
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - File processor and event routing
//! - [`pipeline`] - Dialect, codec, encoder, stages, masking, reports, audit
//! - [`adapters`] - Object store integrations
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use veil::adapters::storage::create_object_store;
//! use veil::config::load_config;
//! use veil::core::FileProcessor;
//! use veil::domain::BaseName;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("veil.toml")?;
//!     let store = create_object_store(&config.storage, &config.storage.bucket)?;
//!     let processor = FileProcessor::from_config(&config, store)?;
//!
//!     let base = BaseName::new("customer_data")?;
//!     processor.tokenize_file(&base).await?;
//!     let report = processor.detokenize_file(&base, config.masking.enabled).await?;
//!
//!     println!("{}", report.summary_line());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Fatal errors ([`domain::VeilError`]) abort a file before anything is
//! written. A token that fails to decode is not fatal: the cell keeps its
//! token and the failure is listed in the [`pipeline::StageReport`].

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod pipeline;
