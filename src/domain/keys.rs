//! Object key naming
//!
//! Every artifact of one file is addressed from a single base name `B`:
//!
//! | artifact     | key                                 |
//! |--------------|-------------------------------------|
//! | PII metadata | `metadata/{B}_pii_fields.json`      |
//! | raw input    | `raw/{B}.csv`                       |
//! | tokenized    | `tokenized/{B}_tokenized.csv`       |
//! | detokenized  | `detokenized/{B}_detokenized.csv`   |
//!
//! These names are shared with downstream consumers and must not change.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const METADATA_PREFIX: &str = "metadata/";
pub const RAW_PREFIX: &str = "raw/";
pub const TOKENIZED_PREFIX: &str = "tokenized/";
pub const DETOKENIZED_PREFIX: &str = "detokenized/";

pub const METADATA_SUFFIX: &str = "_pii_fields.json";
pub const RAW_SUFFIX: &str = ".csv";
pub const TOKENIZED_SUFFIX: &str = "_tokenized.csv";
pub const DETOKENIZED_SUFFIX: &str = "_detokenized.csv";

/// Base name newtype wrapper
///
/// # Examples
///
/// ```
/// use veil::domain::keys::BaseName;
///
/// let base = BaseName::from_tokenized_key("tokenized/customers_tokenized.csv").unwrap();
/// assert_eq!(base.as_str(), "customers");
/// assert_eq!(base.detokenized_key(), "detokenized/customers_detokenized.csv");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseName(String);

impl BaseName {
    /// Creates a new BaseName
    ///
    /// Returns `Err` if the name is blank or contains a path separator.
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Base name cannot be empty".to_string());
        }
        if name.contains('/') {
            return Err(format!("Base name cannot contain '/': {name}"));
        }
        Ok(Self(name))
    }

    /// Derives the base name from a metadata object key
    pub fn from_metadata_key(key: &str) -> Result<Self, String> {
        let file = file_name(key);
        Self::new(file.strip_suffix(METADATA_SUFFIX).unwrap_or(file))
    }

    /// Derives the base name from a tokenized object key
    ///
    /// The `_tokenized.csv` suffix is stripped only when present, so a bare
    /// base name is accepted as well.
    pub fn from_tokenized_key(key: &str) -> Result<Self, String> {
        let file = file_name(key);
        Self::new(file.strip_suffix(TOKENIZED_SUFFIX).unwrap_or(file))
    }

    /// Derives the base name from a raw object key
    pub fn from_raw_key(key: &str) -> Result<Self, String> {
        let file = file_name(key);
        Self::new(file.strip_suffix(RAW_SUFFIX).unwrap_or(file))
    }

    pub fn metadata_key(&self) -> String {
        format!("{METADATA_PREFIX}{}{METADATA_SUFFIX}", self.0)
    }

    pub fn raw_key(&self) -> String {
        format!("{RAW_PREFIX}{}{RAW_SUFFIX}", self.0)
    }

    pub fn tokenized_key(&self) -> String {
        format!("{TOKENIZED_PREFIX}{}{TOKENIZED_SUFFIX}", self.0)
    }

    pub fn detokenized_key(&self) -> String {
        format!("{DETOKENIZED_PREFIX}{}{DETOKENIZED_SUFFIX}", self.0)
    }

    /// Returns the base name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Final path segment of an object key
fn file_name(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}

impl fmt::Display for BaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BaseName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for BaseName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
