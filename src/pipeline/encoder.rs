//! Reversible cell encoding
//!
//! Tokens are self-decodable: the token is a reversible text transform of the
//! value itself and no lookup table exists. This is an audit-friendly
//! encoding, not encryption.

use crate::domain::DecodeError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Reversible value <-> token transform
pub trait TokenCodec: Send + Sync {
    /// Encode a value. Total and deterministic.
    fn encode(&self, value: &str) -> String;

    /// Decode a token back to the original value
    fn decode(&self, token: &str) -> Result<String, DecodeError>;

    /// Name used in logs and reports
    fn name(&self) -> &'static str;
}

/// Standard padded Base64 over the UTF-8 bytes of the value
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64Codec;

impl Base64Codec {
    pub fn new() -> Self {
        Self
    }
}

impl TokenCodec for Base64Codec {
    fn encode(&self, value: &str) -> String {
        STANDARD.encode(value.as_bytes())
    }

    fn decode(&self, token: &str) -> Result<String, DecodeError> {
        let bytes = STANDARD
            .decode(token.as_bytes())
            .map_err(|e| DecodeError::InvalidEncoding(e.to_string()))?;
        String::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8)
    }

    fn name(&self) -> &'static str {
        "base64"
    }
}
