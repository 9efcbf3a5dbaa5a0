//! Integration tests for configuration loading and validation

use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;
use veil::config::{load_config, load_config_or_default, StorageBackend};

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    for name in [
        "VEIL_APPLICATION_LOG_LEVEL",
        "VEIL_APPLICATION_DRY_RUN",
        "VEIL_STORAGE_BACKEND",
        "VEIL_STORAGE_ROOT",
        "VEIL_STORAGE_BUCKET",
        "VEIL_MASKING_ENABLED",
        "VEIL_AUDIT_ENABLED",
        "VEIL_AUDIT_LOG_PATH",
        "VEIL_LOGGING_LOCAL_ENABLED",
        "VEIL_LOGGING_LOCAL_PATH",
        "TEST_VEIL_BUCKET",
    ] {
        std::env::remove_var(name);
    }
}

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = config_file(
        r#"
[application]
name = "veil-test"
log_level = "debug"
dry_run = true

[storage]
backend = "local"
root = "/srv/veil"
bucket = "landing"

[masking]
enabled = false

[masking.field_kinds]
FullName = "name"
Mobile = "phone"

[audit]
enabled = false
log_path = "/tmp/veil-audit.log"
json_format = false

[logging]
local_enabled = false
local_path = "/tmp/veil-logs"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.application.name, "veil-test");
    assert!(config.application.dry_run);
    assert_eq!(config.storage.backend, StorageBackend::Local);
    assert_eq!(config.storage.root.to_string_lossy(), "/srv/veil");
    assert_eq!(config.storage.bucket, "landing");
    assert!(!config.masking.enabled);
    assert_eq!(config.masking.field_kinds.get("Mobile").unwrap(), "phone");
    assert!(!config.audit.json_format);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_VEIL_BUCKET", "substituted-bucket");

    let file = config_file("[storage]\nbucket = \"${TEST_VEIL_BUCKET}\"\n");
    let config = load_config(file.path());
    cleanup_env_vars();

    assert_eq!(config.unwrap().storage.bucket, "substituted-bucket");
}

#[test]
fn test_missing_substitution_variable_fails() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = config_file("[storage]\nbucket = \"${TEST_VEIL_BUCKET}\"\n");
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_VEIL_BUCKET"));
}

#[test]
fn test_env_overrides_take_precedence_over_file() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("VEIL_STORAGE_BACKEND", "memory");
    std::env::set_var("VEIL_MASKING_ENABLED", "false");
    std::env::set_var("VEIL_APPLICATION_LOG_LEVEL", "warn");

    let file = config_file("[storage]\nbackend = \"local\"\n[masking]\nenabled = true\n");
    let config = load_config(file.path());
    cleanup_env_vars();

    let config = config.unwrap();
    assert_eq!(config.storage.backend, StorageBackend::Memory);
    assert!(!config.masking.enabled);
    assert_eq!(config.application.log_level, "warn");
}

#[test]
fn test_invalid_env_override_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("VEIL_STORAGE_BACKEND", "s3");

    let result = load_config_or_default(None);
    cleanup_env_vars();

    assert!(result.is_err());
}

#[test]
fn test_defaults_without_file() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let config = load_config_or_default(None).unwrap();
    assert!(config.masking.enabled);
    assert_eq!(config.storage.bucket, "veil");
    assert_eq!(config.storage.backend, StorageBackend::Local);
}

#[test]
fn test_invalid_values_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    for contents in [
        "[application]\nlog_level = \"loud\"\n",
        "[storage]\nbucket = \"a/b\"\n",
        "[storage]\nbackend = \"s3\"\n",
        "[logging]\nlocal_rotation = \"weekly\"\n",
        "[masking.field_kinds]\nName = \"\"\n",
        "not toml at all [",
    ] {
        let file = config_file(contents);
        assert!(load_config(file.path()).is_err(), "accepted: {contents}");
    }
}
