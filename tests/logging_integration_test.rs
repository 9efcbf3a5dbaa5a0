//! Integration tests for logging functionality

use veil::config::LoggingConfig;
use veil::logging::{init_logging, parse_log_level};

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_rotation, "daily");
    assert_eq!(config.local_path, "./logs");
}

#[test]
fn test_parse_log_level_rejects_unknown() {
    assert!(parse_log_level("info").is_ok());
    assert!(parse_log_level("chatty").is_err());
}

// Installs the global subscriber; this is the only test in this binary that does.
#[test]
fn test_file_logging_creates_directory() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "hourly".to_string(),
    };
    assert!(!log_path.exists());

    let guard = init_logging("debug", &config).unwrap();
    assert!(guard.has_file_output());
    assert!(log_path.exists());

    veil::log_stage_start!("tokenize", "customer_data");
    drop(guard);

    // a second global subscriber is refused rather than panicking
    assert!(init_logging("info", &LoggingConfig::default()).is_err());
}
