//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::VeilConfig;
use crate::domain::errors::VeilError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into VeilConfig
/// 4. Applies environment variable overrides (VEIL_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`VeilError::Configuration`] if the file is missing or unreadable,
/// references an unset variable, fails to parse, or fails validation.
///
/// # Examples
///
/// ```no_run
/// use veil::config::loader::load_config;
///
/// let config = load_config("veil.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<VeilConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(VeilError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        VeilError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: VeilConfig = toml::from_str(&contents)
        .map_err(|e| VeilError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        VeilError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Loads configuration from `path` if given, otherwise built-in defaults
///
/// Environment overrides and validation apply in both cases, so a deployment
/// can run with no file at all.
pub fn load_config_or_default(path: Option<&Path>) -> Result<VeilConfig> {
    match path {
        Some(path) => load_config(path),
        None => {
            let mut config = VeilConfig::default();
            apply_env_overrides(&mut config)?;
            config.validate().map_err(|e| {
                VeilError::Configuration(format!("Configuration validation failed: {}", e))
            })?;
            Ok(config)
        }
    }
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied through untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
pub(crate) fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| VeilError::Configuration(format!("Invalid substitution pattern: {}", e)))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(VeilError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn parse_bool_override(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(VeilError::Configuration(format!(
            "{name} must be a boolean, got '{value}'"
        ))),
    }
}

/// Applies environment variable overrides using VEIL_* prefix
///
/// Environment variables follow the pattern: VEIL_<SECTION>_<KEY>
/// For example: VEIL_STORAGE_BUCKET, VEIL_MASKING_ENABLED
fn apply_env_overrides(config: &mut VeilConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("VEIL_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("VEIL_APPLICATION_DRY_RUN") {
        config.application.dry_run = parse_bool_override("VEIL_APPLICATION_DRY_RUN", &val)?;
    }

    // Storage overrides
    if let Ok(val) = std::env::var("VEIL_STORAGE_BACKEND") {
        config.storage.backend = val.parse().map_err(VeilError::Configuration)?;
    }
    if let Ok(val) = std::env::var("VEIL_STORAGE_ROOT") {
        config.storage.root = val.into();
    }
    if let Ok(val) = std::env::var("VEIL_STORAGE_BUCKET") {
        config.storage.bucket = val;
    }

    // Masking overrides
    if let Ok(val) = std::env::var("VEIL_MASKING_ENABLED") {
        config.masking.enabled = parse_bool_override("VEIL_MASKING_ENABLED", &val)?;
    }

    // Audit overrides
    if let Ok(val) = std::env::var("VEIL_AUDIT_ENABLED") {
        config.audit.enabled = parse_bool_override("VEIL_AUDIT_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("VEIL_AUDIT_LOG_PATH") {
        config.audit.log_path = val.into();
    }

    // Logging overrides
    if let Ok(val) = std::env::var("VEIL_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_bool_override("VEIL_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("VEIL_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
