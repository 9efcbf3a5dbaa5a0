//! Detokenization stage
//!
//! Decodes every non-empty cell of a PII column and, when masking is on,
//! passes the decoded value through the field-kind mask. A cell whose token
//! does not decode keeps its token; the failure is recorded and the pass goes
//! on with the next cell.

use crate::domain::{DecodeError, PiiColumnSet, Result, Table};
use crate::pipeline::encoder::TokenCodec;
use crate::pipeline::masking::{FieldKinds, MaskRegistry};
use crate::pipeline::tokenize::pii_indices;
use serde::{Deserialize, Serialize};

/// Outcome of revealing one cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellOutcome {
    /// Decoded, and masked if requested
    Revealed(String),
    /// Token did not decode; the token itself is emitted
    Fallback { token: String, error: DecodeError },
}

impl CellOutcome {
    /// Value written to the output cell
    pub fn into_value(self) -> String {
        match self {
            Self::Revealed(value) => value,
            Self::Fallback { token, .. } => token,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// A cell that kept its token because it could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeFailure {
    /// Zero-based data row index (header excluded)
    pub row: usize,
    pub column: String,
    pub reason: String,
    /// The undecodable token, kept for audit hashing only
    #[serde(skip)]
    pub token: String,
}

/// Options for one detokenization pass
#[derive(Clone, Copy)]
pub struct DetokenizeOptions<'a> {
    pub masking_enabled: bool,
    pub codec: &'a dyn TokenCodec,
    pub registry: &'a MaskRegistry,
    pub kinds: &'a FieldKinds,
}

/// Result of a detokenization pass
#[derive(Debug, Clone)]
pub struct DetokenizeOutput {
    pub table: Table,
    pub cells_decoded: usize,
    pub cells_masked: usize,
    pub failures: Vec<DecodeFailure>,
    pub unmatched_columns: Vec<String>,
}

/// Reveal a single cell
pub fn reveal_cell(
    token: &str,
    kind: &str,
    masking_enabled: bool,
    codec: &dyn TokenCodec,
    registry: &MaskRegistry,
) -> CellOutcome {
    match codec.decode(token) {
        Ok(value) if masking_enabled => CellOutcome::Revealed(registry.mask(kind, &value)),
        Ok(value) => CellOutcome::Revealed(value),
        Err(error) => CellOutcome::Fallback {
            token: token.to_string(),
            error,
        },
    }
}

/// Detokenize the PII columns of a table
///
/// # Examples
///
/// ```
/// use veil::domain::{Delimiter, PiiColumnSet};
/// use veil::pipeline::codec;
/// use veil::pipeline::detokenize::{detokenize, DetokenizeOptions};
/// use veil::pipeline::encoder::Base64Codec;
/// use veil::pipeline::masking::{FieldKinds, MaskRegistry};
///
/// let table = codec::parse("Name,City\nSm9obiBEb2U=,Oslo\n", Delimiter::COMMA).unwrap();
/// let pii = PiiColumnSet::new(["Name"]);
/// let options = DetokenizeOptions {
///     masking_enabled: true,
///     codec: &Base64Codec::new(),
///     registry: &MaskRegistry::with_defaults(),
///     kinds: &FieldKinds::default(),
/// };
/// let output = detokenize(table, &pii, options).unwrap();
/// assert_eq!(output.table.cell(0, "Name"), Some("J*** D**"));
/// ```
pub fn detokenize(
    table: Table,
    pii: &PiiColumnSet,
    options: DetokenizeOptions<'_>,
) -> Result<DetokenizeOutput> {
    let indices = pii_indices(table.headers(), pii);
    let unmatched_columns = pii.unmatched(table.headers());
    let kinds: Vec<String> = indices
        .iter()
        .map(|&i| options.kinds.kind_for(&table.headers()[i]))
        .collect();

    let mut cells_decoded = 0usize;
    let mut cells_masked = 0usize;
    let mut failures = Vec::new();

    let (headers, mut rows) = table.into_parts();
    for (row_index, record) in rows.iter_mut().enumerate() {
        let cells = record.cells_mut();
        for (&index, kind) in indices.iter().zip(&kinds) {
            let cell = &mut cells[index];
            if cell.is_empty() {
                continue;
            }

            let outcome = reveal_cell(
                cell,
                kind,
                options.masking_enabled,
                options.codec,
                options.registry,
            );
            match outcome {
                CellOutcome::Revealed(value) => {
                    cells_decoded += 1;
                    if options.masking_enabled && options.registry.is_registered(kind) {
                        cells_masked += 1;
                    }
                    *cell = value;
                }
                CellOutcome::Fallback { error, .. } => {
                    crate::log_decode_fallback!(row_index, &headers[index], &error);
                    failures.push(DecodeFailure {
                        row: row_index,
                        column: headers[index].clone(),
                        reason: error.to_string(),
                        token: cell.clone(),
                    });
                }
            }
        }
    }

    tracing::debug!(
        cells_decoded,
        cells_masked,
        decode_failures = failures.len(),
        masking_enabled = options.masking_enabled,
        "Detokenization pass complete"
    );

    Ok(DetokenizeOutput {
        table: Table::new(headers, rows)?,
        cells_decoded,
        cells_masked,
        failures,
        unmatched_columns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Delimiter;
    use crate::pipeline::codec;
    use crate::pipeline::encoder::Base64Codec;

    const TOKENIZED: &str = "Name,Email,Phone,DOB,TransactionID\n\
        Sm9obiBEb2U=,am9obkBleGFtcGxlLmNvbQ==,OTg3NjU0MzIxMA==,1990-01-01,TXN1001\n";

    fn run(text: &str, masking_enabled: bool) -> DetokenizeOutput {
        let table = codec::parse(text, Delimiter::COMMA).unwrap();
        let pii = PiiColumnSet::new(["Name", "Email", "Phone"]);
        let options = DetokenizeOptions {
            masking_enabled,
            codec: &Base64Codec::new(),
            registry: &MaskRegistry::with_defaults(),
            kinds: &FieldKinds::default(),
        };
        detokenize(table, &pii, options).unwrap()
    }

    #[test]
    fn test_detokenize_with_masking() {
        let output = run(TOKENIZED, true);
        let text = codec::serialize(&output.table, Delimiter::COMMA).unwrap();
        assert_eq!(
            text.lines().nth(1),
            Some("J*** D**,j**n@example.com,******3210,1990-01-01,TXN1001")
        );
        assert_eq!(output.cells_decoded, 3);
        assert_eq!(output.cells_masked, 3);
        assert!(output.failures.is_empty());
    }

    #[test]
    fn test_detokenize_without_masking() {
        let output = run(TOKENIZED, false);
        assert_eq!(output.table.cell(0, "Name"), Some("John Doe"));
        assert_eq!(output.table.cell(0, "Email"), Some("john@example.com"));
        assert_eq!(output.table.cell(0, "Phone"), Some("9876543210"));
        assert_eq!(output.cells_masked, 0);
    }

    #[test]
    fn test_corrupt_token_falls_back() {
        let text = "Name,Email,Phone,DOB,TransactionID\n\
            %%corrupt%%,am9obkBleGFtcGxlLmNvbQ==,//4=,1990-01-01,TXN1001\n";
        let output = run(text, true);

        assert_eq!(output.table.cell(0, "Name"), Some("%%corrupt%%"));
        assert_eq!(output.table.cell(0, "Email"), Some("j**n@example.com"));
        assert_eq!(output.table.cell(0, "Phone"), Some("//4="));
        assert_eq!(output.failures.len(), 2);
        assert_eq!(output.failures[0].column, "Name");
        assert_eq!(output.failures[1].column, "Phone");
        assert_eq!(output.failures[1].reason, DecodeError::InvalidUtf8.to_string());
    }

    #[test]
    fn test_empty_cells_untouched() {
        let text = "Name,Email,Phone\n,,\n";
        let output = run(text, true);
        assert_eq!(output.table.rows()[0].cells(), &["", "", ""]);
        assert_eq!(output.cells_decoded, 0);
    }

    #[test]
    fn test_unregistered_kind_is_decoded_unmasked() {
        let table = codec::parse("Ssn\nMTIzLTQ1LTY3ODk=\n", Delimiter::COMMA).unwrap();
        let pii = PiiColumnSet::new(["Ssn"]);
        let options = DetokenizeOptions {
            masking_enabled: true,
            codec: &Base64Codec::new(),
            registry: &MaskRegistry::with_defaults(),
            kinds: &FieldKinds::default(),
        };
        let output = detokenize(table, &pii, options).unwrap();
        assert_eq!(output.table.cell(0, "Ssn"), Some("123-45-6789"));
        assert_eq!(output.cells_masked, 0);
    }

    #[test]
    fn test_kind_from_column_name_is_case_insensitive() {
        let table = codec::parse("EMAIL\nam9obkBleGFtcGxlLmNvbQ==\n", Delimiter::COMMA).unwrap();
        let pii = PiiColumnSet::new(["EMAIL"]);
        let options = DetokenizeOptions {
            masking_enabled: true,
            codec: &Base64Codec::new(),
            registry: &MaskRegistry::with_defaults(),
            kinds: &FieldKinds::default(),
        };
        let output = detokenize(table, &pii, options).unwrap();
        assert_eq!(output.table.cell(0, "EMAIL"), Some("j**n@example.com"));
    }

    #[test]
    fn test_reveal_cell_outcomes() {
        let codec = Base64Codec::new();
        let registry = MaskRegistry::with_defaults();
        assert_eq!(
            reveal_cell("Sm9obiBEb2U=", "name", false, &codec, &registry),
            CellOutcome::Revealed("John Doe".to_string())
        );
        let fallback = reveal_cell("???", "name", true, &codec, &registry);
        assert!(fallback.is_fallback());
        assert_eq!(fallback.into_value(), "???");
    }
}
