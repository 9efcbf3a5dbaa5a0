//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Veil using clap.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Veil - PII tokenization pipeline for delimited files
#[derive(Parser, Debug)]
#[command(name = "veil")]
#[command(version, about, long_about = None)]
#[command(author = "Veil Contributors")]
pub struct Cli {
    /// Path to configuration file (defaults to ./veil.toml when present)
    #[arg(short, long, env = "VEIL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "VEIL_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Tokenize PII columns of raw files
    Tokenize(commands::tokenize::TokenizeArgs),

    /// Produce display copies of tokenized files
    Detokenize(commands::detokenize::DetokenizeArgs),

    /// Process an object-arrival event file
    HandleEvent(commands::handle_event::HandleEventArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

impl Cli {
    /// Execute the selected command and return the process exit code
    pub async fn execute(&self) -> anyhow::Result<i32> {
        let config_path = self.config.as_deref();
        match &self.command {
            Commands::Tokenize(args) => args.execute(config_path).await,
            Commands::Detokenize(args) => args.execute(config_path).await,
            Commands::HandleEvent(args) => args.execute(config_path).await,
            Commands::ValidateConfig(args) => args.execute(config_path).await,
            Commands::Init(args) => args.execute().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_tokenize() {
        let cli = Cli::parse_from(["veil", "tokenize", "customers", "orders"]);
        match cli.command {
            Commands::Tokenize(args) => {
                assert_eq!(args.bases, vec!["customers", "orders"]);
                assert!(!args.dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_tokenize_requires_base() {
        assert!(Cli::try_parse_from(["veil", "tokenize"]).is_err());
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["veil", "--config", "custom.toml", "validate-config"]);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["veil", "--log-level", "debug", "init"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_detokenize_flags() {
        let cli = Cli::parse_from([
            "veil",
            "detokenize",
            "tokenized/customers_tokenized.csv",
            "--no-mask",
            "--bucket",
            "pii",
        ]);
        match cli.command {
            Commands::Detokenize(args) => {
                assert!(args.no_mask);
                assert_eq!(args.bucket.as_deref(), Some("pii"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_mask_flags_conflict() {
        assert!(Cli::try_parse_from(["veil", "detokenize", "a", "--mask", "--no-mask"]).is_err());
    }

    #[test]
    fn test_cli_parse_handle_event() {
        let cli = Cli::parse_from(["veil", "handle-event", "event.json"]);
        assert!(matches!(cli.command, Commands::HandleEvent(_)));
    }
}
