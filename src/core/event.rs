//! Object-arrival events and routing
//!
//! Events use the S3 notification shape:
//!
//! ```json
//! {"Records": [{"s3": {"bucket": {"name": "pii"}, "object": {"key": "metadata/a_pii_fields.json"}}}]}
//! ```
//!
//! Keys arrive URL-encoded (`+` for space, `%XX` escapes) and are decoded
//! before routing.

use crate::domain::keys::{METADATA_PREFIX, METADATA_SUFFIX, TOKENIZED_PREFIX, TOKENIZED_SUFFIX};
use crate::domain::{BaseName, Result, VeilError};
use serde::Deserialize;
use std::collections::BTreeMap;

/// One object that arrived in a bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRecord {
    pub bucket: String,
    /// Decoded object key
    pub key: String,
}

/// A batch of object-arrival records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectEvent {
    pub records: Vec<ObjectRecord>,
}

#[derive(Deserialize)]
struct RawEvent {
    #[serde(rename = "Records", default)]
    records: Vec<RawRecord>,
}

#[derive(Deserialize)]
struct RawRecord {
    s3: RawS3,
}

#[derive(Deserialize)]
struct RawS3 {
    bucket: RawBucket,
    object: RawObject,
}

#[derive(Deserialize)]
struct RawBucket {
    name: String,
}

#[derive(Deserialize)]
struct RawObject {
    key: String,
}

impl ObjectEvent {
    /// Parse an event from JSON text
    ///
    /// # Errors
    ///
    /// Returns [`VeilError::Validation`] if the JSON does not have the
    /// notification shape.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let raw: RawEvent = serde_json::from_str(text.trim_start_matches('\u{feff}'))
            .map_err(|e| VeilError::Validation(format!("Invalid object event: {e}")))?;

        let records = raw
            .records
            .into_iter()
            .map(|r| ObjectRecord {
                bucket: r.s3.bucket.name,
                key: decode_key(&r.s3.object.key),
            })
            .collect();

        Ok(Self { records })
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records grouped by bucket, buckets in sorted order
    pub fn by_bucket(&self) -> BTreeMap<&str, Vec<&ObjectRecord>> {
        let mut groups: BTreeMap<&str, Vec<&ObjectRecord>> = BTreeMap::new();
        for record in &self.records {
            groups.entry(record.bucket.as_str()).or_default().push(record);
        }
        groups
    }
}

/// What an arriving object triggers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// PII metadata arrived: tokenize the matching raw file
    Tokenize(BaseName),
    /// A tokenized file arrived: produce its display copy
    Detokenize(BaseName),
    /// Not a trigger object
    Ignore,
}

/// Route an object key to a pipeline stage
///
/// # Examples
///
/// ```
/// use veil::core::event::{route, Route};
///
/// assert!(matches!(route("metadata/customers_pii_fields.json"), Route::Tokenize(b) if b.as_str() == "customers"));
/// assert!(matches!(route("tokenized/customers_tokenized.csv"), Route::Detokenize(_)));
/// assert_eq!(route("raw/customers.csv"), Route::Ignore);
/// ```
pub fn route(key: &str) -> Route {
    if key.starts_with(METADATA_PREFIX) && key.ends_with(METADATA_SUFFIX) {
        if let Ok(base) = BaseName::from_metadata_key(key) {
            return Route::Tokenize(base);
        }
    } else if key.starts_with(TOKENIZED_PREFIX) && key.ends_with(TOKENIZED_SUFFIX) {
        if let Ok(base) = BaseName::from_tokenized_key(key) {
            return Route::Detokenize(base);
        }
    }
    Route::Ignore
}

/// Decode an event key: `+` becomes a space, `%XX` becomes the byte it names
///
/// Malformed escapes are kept literally. `&` and `=` are part of the key, not
/// pair separators.
pub fn decode_key(key: &str) -> String {
    let escaped = key.replace('&', "%26").replace('=', "%3D");
    url::form_urlencoded::parse(escaped.as_bytes())
        .next()
        .map(|(name, _)| name.into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_parse_s3_event() {
        let json = r#"{
            "Records": [
                {"eventName": "ObjectCreated:Put",
                 "s3": {"bucket": {"name": "pii-bucket", "arn": "x"},
                        "object": {"key": "metadata/customer+data_pii_fields.json", "size": 20}}}
            ]
        }"#;
        let event = ObjectEvent::from_json_str(json).unwrap();
        assert_eq!(event.records.len(), 1);
        assert_eq!(event.records[0].bucket, "pii-bucket");
        assert_eq!(event.records[0].key, "metadata/customer data_pii_fields.json");
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        assert!(ObjectEvent::from_json_str(r#"{"Records": [{"s3": {}}]}"#).is_err());
        assert!(ObjectEvent::from_json_str("not json").is_err());
    }

    #[test]
    fn test_missing_records_is_empty_event() {
        let event = ObjectEvent::from_json_str("{}").unwrap();
        assert!(event.is_empty());
    }

    #[test]
    fn test_by_bucket_groups_records() {
        let event = ObjectEvent {
            records: vec![
                ObjectRecord { bucket: "b".into(), key: "k1".into() },
                ObjectRecord { bucket: "a".into(), key: "k2".into() },
                ObjectRecord { bucket: "b".into(), key: "k3".into() },
            ],
        };
        let groups = event.by_bucket();
        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(groups["b"].len(), 2);
    }

    #[test_case("a+b", "a b" ; "plus is space")]
    #[test_case("a%20b", "a b" ; "percent escape")]
    #[test_case("caf%C3%A9", "café" ; "multibyte escape")]
    #[test_case("100%", "100%" ; "trailing percent")]
    #[test_case("%zz", "%zz" ; "invalid hex kept")]
    #[test_case("%4", "%4" ; "short escape kept")]
    #[test_case("a%2Bb", "a+b" ; "escaped plus")]
    #[test_case("raw/q=1&r=2.csv", "raw/q=1&r=2.csv" ; "separators kept")]
    #[test_case("", "" ; "empty key")]
    fn test_decode_key(input: &str, expected: &str) {
        assert_eq!(decode_key(input), expected);
    }

    #[test]
    fn test_route() {
        assert_eq!(
            route("metadata/customers_pii_fields.json"),
            Route::Tokenize(BaseName::new("customers").unwrap())
        );
        assert_eq!(
            route("tokenized/customers_tokenized.csv"),
            Route::Detokenize(BaseName::new("customers").unwrap())
        );
        assert_eq!(route("detokenized/customers_detokenized.csv"), Route::Ignore);
        assert_eq!(route("metadata/notes.txt"), Route::Ignore);
        assert_eq!(route("metadata/_pii_fields.json"), Route::Ignore);
    }
}
