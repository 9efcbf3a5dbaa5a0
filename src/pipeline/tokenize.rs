//! Tokenization stage
//!
//! Replaces every non-empty cell of a PII column with its token. Empty cells
//! and non-PII columns are left as they are; rows and columns are never added,
//! dropped or reordered.

use crate::domain::{PiiColumnSet, Result, Table};
use crate::pipeline::encoder::TokenCodec;
use serde::{Deserialize, Serialize};

/// Counters for one tokenization pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizeStats {
    pub rows: usize,
    pub cells_encoded: usize,
    /// PII columns present in the header, in header order
    pub matched_columns: Vec<String>,
    /// PII columns named by the metadata but absent from the header
    pub unmatched_columns: Vec<String>,
}

/// Indices of header columns that are in the PII set
pub(crate) fn pii_indices(headers: &[String], pii: &PiiColumnSet) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .filter(|(_, h)| pii.contains(h))
        .map(|(i, _)| i)
        .collect()
}

/// Tokenize the PII columns of a table
///
/// # Errors
///
/// Returns [`crate::domain::VeilError::Structural`] if the resulting table
/// would be structurally invalid.
///
/// # Examples
///
/// ```
/// use veil::domain::{Delimiter, PiiColumnSet};
/// use veil::pipeline::{codec, encoder::Base64Codec, tokenize::tokenize};
///
/// let table = codec::parse("Name,City\nJohn Doe,Oslo\n", Delimiter::COMMA).unwrap();
/// let pii = PiiColumnSet::new(["Name"]);
/// let (tokenized, stats) = tokenize(table, &pii, &Base64Codec::new()).unwrap();
/// assert_eq!(tokenized.cell(0, "Name"), Some("Sm9obiBEb2U="));
/// assert_eq!(tokenized.cell(0, "City"), Some("Oslo"));
/// assert_eq!(stats.cells_encoded, 1);
/// ```
pub fn tokenize(
    table: Table,
    pii: &PiiColumnSet,
    codec: &dyn TokenCodec,
) -> Result<(Table, TokenizeStats)> {
    let indices = pii_indices(table.headers(), pii);
    let mut stats = TokenizeStats {
        rows: table.row_count(),
        matched_columns: indices
            .iter()
            .map(|&i| table.headers()[i].clone())
            .collect(),
        unmatched_columns: pii.unmatched(table.headers()),
        ..TokenizeStats::default()
    };

    let (headers, mut rows) = table.into_parts();
    for record in &mut rows {
        let cells = record.cells_mut();
        for &index in &indices {
            let cell = &mut cells[index];
            if cell.is_empty() {
                continue;
            }
            *cell = codec.encode(cell);
            stats.cells_encoded += 1;
        }
    }

    tracing::debug!(
        rows = stats.rows,
        cells_encoded = stats.cells_encoded,
        codec = codec.name(),
        "Tokenization pass complete"
    );

    Ok((Table::new(headers, rows)?, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Delimiter, Record};
    use crate::pipeline::codec;
    use crate::pipeline::encoder::Base64Codec;

    fn sample() -> Table {
        codec::parse(
            "Name,Email,Phone,DOB,TransactionID\n\
             John Doe,john@example.com,9876543210,1990-01-01,TXN1001\n\
             ,jane@example.com,,1985-05-05,TXN1002\n",
            Delimiter::COMMA,
        )
        .unwrap()
    }

    #[test]
    fn test_tokenize_pii_columns_only() {
        let pii = PiiColumnSet::new(["Name", "Email", "Phone"]);
        let (out, stats) = tokenize(sample(), &pii, &Base64Codec::new()).unwrap();

        assert_eq!(out.cell(0, "Name"), Some("Sm9obiBEb2U="));
        assert_eq!(out.cell(0, "Email"), Some("am9obkBleGFtcGxlLmNvbQ=="));
        assert_eq!(out.cell(0, "Phone"), Some("OTg3NjU0MzIxMA=="));
        assert_eq!(out.cell(0, "DOB"), Some("1990-01-01"));
        assert_eq!(out.cell(0, "TransactionID"), Some("TXN1001"));
        assert_eq!(stats.cells_encoded, 4);
        assert_eq!(stats.matched_columns, vec!["Name", "Email", "Phone"]);
    }

    #[test]
    fn test_empty_cells_untouched() {
        let pii = PiiColumnSet::new(["Name", "Phone"]);
        let (out, _) = tokenize(sample(), &pii, &Base64Codec::new()).unwrap();
        assert_eq!(out.cell(1, "Name"), Some(""));
        assert_eq!(out.cell(1, "Phone"), Some(""));
    }

    #[test]
    fn test_structure_preserved() {
        let input = sample();
        let pii = PiiColumnSet::new(["Email"]);
        let (out, stats) = tokenize(input.clone(), &pii, &Base64Codec::new()).unwrap();
        assert_eq!(out.headers(), input.headers());
        assert_eq!(out.row_count(), input.row_count());
        assert_eq!(stats.rows, 2);
    }

    #[test]
    fn test_unmatched_columns_ignored() {
        let pii = PiiColumnSet::new(["Ssn", "name"]);
        let input = sample();
        let (out, stats) = tokenize(input.clone(), &pii, &Base64Codec::new()).unwrap();
        assert_eq!(out, input);
        assert_eq!(stats.cells_encoded, 0);
        assert_eq!(stats.unmatched_columns, vec!["Ssn", "name"]);
    }

    #[test]
    fn test_empty_table() {
        let table = Table::new(vec!["Name".to_string()], Vec::<Record>::new()).unwrap();
        let pii = PiiColumnSet::new(["Name"]);
        let (out, stats) = tokenize(table, &pii, &Base64Codec::new()).unwrap();
        assert_eq!(out.row_count(), 0);
        assert_eq!(stats.cells_encoded, 0);
    }
}
