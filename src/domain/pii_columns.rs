//! PII column set
//!
//! The external classifier publishes the sensitive column names of a file as a
//! JSON array of strings. Matching against the header is exact and
//! case-sensitive; names that are not in the header are ignored.

use crate::domain::errors::VeilError;
use crate::domain::result::Result;
use std::collections::BTreeSet;

const UTF8_BOM: char = '\u{feff}';

/// Immutable set of sensitive column names for one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PiiColumnSet {
    columns: BTreeSet<String>,
}

impl PiiColumnSet {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses the metadata document
    ///
    /// A leading UTF-8 BOM and surrounding whitespace are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`VeilError::MetadataUnavailable`] if the bytes are not UTF-8 or
    /// the document is not a JSON array of strings.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            VeilError::MetadataUnavailable(format!("metadata is not valid UTF-8: {e}"))
        })?;
        Self::from_json_str(text)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let text = text.trim_start_matches(UTF8_BOM).trim();
        let columns: Vec<String> = serde_json::from_str(text).map_err(|e| {
            VeilError::MetadataUnavailable(format!(
                "metadata must be a JSON array of column names: {e}"
            ))
        })?;
        Ok(Self::new(columns))
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.contains(column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    /// Entries that do not name any of the given header columns
    pub fn unmatched(&self, headers: &[String]) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| !headers.iter().any(|h| h == *c))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_array() {
        let set = PiiColumnSet::from_json_str(r#"["Name", "Email", "Phone"]"#).unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.contains("Email"));
        assert!(!set.contains("email"));
    }

    #[test]
    fn test_parse_with_bom_and_whitespace() {
        let bytes = "\u{feff}  [\"Name\"]\n".as_bytes();
        let set = PiiColumnSet::from_json_bytes(bytes).unwrap();
        assert!(set.contains("Name"));
    }

    #[test]
    fn test_duplicates_collapse() {
        let set = PiiColumnSet::from_json_str(r#"["Name", "Name"]"#).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_empty_array_is_allowed() {
        let set = PiiColumnSet::from_json_str("[]").unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_non_array_is_metadata_unavailable() {
        for doc in [r#"{"fields": ["Name"]}"#, "['Name']", "", "[1, 2]"] {
            let result = PiiColumnSet::from_json_str(doc);
            assert!(
                matches!(result, Err(VeilError::MetadataUnavailable(_))),
                "expected failure for {doc:?}"
            );
        }
    }

    #[test]
    fn test_invalid_utf8_is_metadata_unavailable() {
        let result = PiiColumnSet::from_json_bytes(&[0xff, 0xfe, 0x00]);
        assert!(matches!(result, Err(VeilError::MetadataUnavailable(_))));
    }

    #[test]
    fn test_unmatched_columns() {
        let set = PiiColumnSet::new(["Name", "Ssn"]);
        let headers = vec!["Name".to_string(), "Email".to_string()];
        assert_eq!(set.unmatched(&headers), vec!["Ssn".to_string()]);
    }
}
