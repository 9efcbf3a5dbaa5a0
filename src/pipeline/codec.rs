//! Tabular codec
//!
//! Parses delimited text into a [`Table`] and writes it back with the same
//! delimiter and header order. Quoting follows the usual CSV rules (double
//! quotes, doubled quote as escape, minimal quoting on output).
//!
//! Output line policy: every line, the last one included, ends with a single
//! `\n`. No blank line is written after the last record.

use crate::domain::{Delimiter, Record, Result, Table, VeilError};
use crate::pipeline::dialect;
use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};

/// Parse raw text with a known delimiter
///
/// The first line with content is the header, the same line
/// [`dialect::sniff`] samples. Short rows are padded with empty values,
/// fields past the header width are dropped. Blank and whitespace-only lines
/// are skipped.
///
/// # Errors
///
/// Returns [`VeilError::Structural`] if the header is empty or has duplicate
/// names, or a line cannot be read.
pub fn parse(text: &str, delimiter: Delimiter) -> Result<Table> {
    let text = dialect::content_start(text);

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| VeilError::Structural(format!("Failed to read header: {e}")))?
        .iter()
        .map(str::to_string)
        .collect();

    let width = headers.len();
    let mut rows = Vec::new();
    let mut overflowing = 0usize;

    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            VeilError::Structural(format!("Failed to parse row {}: {e}", index + 1))
        })?;

        if is_blank(&record) {
            continue;
        }
        if record.len() > width {
            overflowing += 1;
        }

        rows.push(Record::new(record.iter().map(str::to_string).collect()));
    }

    if overflowing > 0 {
        tracing::debug!(
            rows = overflowing,
            columns = width,
            "Dropped fields beyond header width"
        );
    }

    Table::new(headers, rows)
}

/// Serialize a table with the given delimiter
pub fn serialize(table: &Table, delimiter: Delimiter) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter.as_byte())
        .terminator(Terminator::Any(b'\n'))
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer
        .write_record(table.headers())
        .map_err(|e| VeilError::Serialization(format!("Failed to write header: {e}")))?;

    for (index, record) in table.rows().iter().enumerate() {
        writer.write_record(record.cells()).map_err(|e| {
            VeilError::Serialization(format!("Failed to write row {}: {e}", index + 1))
        })?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| VeilError::Io(format!("Failed to flush output: {}", e.error())))?;

    String::from_utf8(bytes).map_err(|e| VeilError::Serialization(e.to_string()))
}

fn is_blank(record: &StringRecord) -> bool {
    record.len() <= 1 && record.iter().all(|field| field.trim().is_empty())
}
