//! In-memory tabular model
//!
//! A [`Table`] is one file's header plus its records. Cells are stored
//! positionally: `record.cells()[i]` belongs to `headers[i]`. Column order is
//! the file's order and every stage keeps it.

use crate::domain::errors::VeilError;
use crate::domain::result::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Single-byte field delimiter of one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Delimiter(u8);

impl Delimiter {
    pub const COMMA: Self = Self(b',');
    pub const SEMICOLON: Self = Self(b';');
    pub const TAB: Self = Self(b'\t');
    pub const PIPE: Self = Self(b'|');

    pub fn new(byte: u8) -> Self {
        Self(byte)
    }

    pub fn as_byte(self) -> u8 {
        self.0
    }

    pub fn as_char(self) -> char {
        self.0 as char
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            b'\t' => write!(f, "\\t"),
            byte => write!(f, "{}", byte as char),
        }
    }
}

/// One row, aligned to the table header
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    cells: Vec<String>,
}

impl Record {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [String] {
        &mut self.cells
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Header plus records of one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Record>,
}

impl Table {
    /// Builds a table, checking the header and padding or truncating rows to it
    ///
    /// # Errors
    ///
    /// Returns [`VeilError::Structural`] if the header is empty or contains
    /// duplicate column names.
    pub fn new(headers: Vec<String>, rows: Vec<Record>) -> Result<Self> {
        validate_headers(&headers)?;
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut record| {
                record.cells.resize(width, String::new());
                record
            })
            .collect();
        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Position of a column, exact and case-sensitive
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell by row index and column name
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index)
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<Record>) {
        (self.headers, self.rows)
    }
}

fn validate_headers(headers: &[String]) -> Result<()> {
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(VeilError::Structural("header row is empty".to_string()));
    }

    let mut seen = HashSet::with_capacity(headers.len());
    for header in headers {
        if !seen.insert(header.as_str()) {
            return Err(VeilError::Structural(format!(
                "duplicate column name in header: {header:?}"
            )));
        }
    }
    Ok(())
}
