//! Delimiter sniffing
//!
//! Inspects the first non-empty line of a file and picks the candidate
//! delimiter that occurs most often on it. Ties go to the earlier candidate in
//! [`CANDIDATES`]. Delimiters inside a double-quoted field are not counted.

use crate::domain::{Delimiter, DialectError};

/// Candidate delimiters in priority order
pub const CANDIDATES: [Delimiter; 4] = [
    Delimiter::COMMA,
    Delimiter::SEMICOLON,
    Delimiter::TAB,
    Delimiter::PIPE,
];

/// Infer the delimiter of a raw tabular text blob
///
/// # Errors
///
/// Returns [`DialectError::EmptySample`] when the text has no non-empty line
/// and [`DialectError::NoCandidate`] when no candidate occurs on it.
///
/// # Examples
///
/// ```
/// use veil::pipeline::dialect::sniff;
/// use veil::domain::Delimiter;
///
/// assert_eq!(sniff("a;b;c\n1;2;3\n").unwrap(), Delimiter::SEMICOLON);
/// ```
pub fn sniff(text: &str) -> Result<Delimiter, DialectError> {
    let sample = sample_line(text).ok_or(DialectError::EmptySample)?;
    sniff_line(sample)
}

/// Infer the delimiter from a single sample line
pub fn sniff_line(line: &str) -> Result<Delimiter, DialectError> {
    if line.is_empty() {
        return Err(DialectError::EmptySample);
    }

    let counts = count_unquoted(line);
    let mut best: Option<(Delimiter, usize)> = None;
    for (candidate, count) in CANDIDATES.iter().zip(counts) {
        // strictly greater keeps the earlier candidate on ties
        if count > 0 && best.map_or(true, |(_, c)| count > c) {
            best = Some((*candidate, count));
        }
    }

    best.map(|(delimiter, count)| {
        tracing::debug!(delimiter = %delimiter, occurrences = count, "Delimiter detected");
        delimiter
    })
    .ok_or_else(|| DialectError::NoCandidate(line.to_string()))
}

/// Text from the first line with any content on, BOM and leading blank or
/// whitespace-only lines removed
///
/// The codec parses from the same position the sniffer samples, so the line
/// used to infer the delimiter is the line read as the header.
pub fn content_start(text: &str) -> &str {
    let mut rest = text.trim_start_matches('\u{feff}');
    while let Some(end) = rest.find('\n') {
        if !rest[..end].trim().is_empty() {
            return rest;
        }
        rest = &rest[end + 1..];
    }
    if rest.trim().is_empty() {
        ""
    } else {
        rest
    }
}

fn sample_line(text: &str) -> Option<&str> {
    content_start(text)
        .lines()
        .next()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
}

fn count_unquoted(line: &str) -> [usize; CANDIDATES.len()] {
    let mut counts = [0usize; CANDIDATES.len()];
    let mut in_quotes = false;
    for byte in line.bytes() {
        if byte == b'"' {
            in_quotes = !in_quotes;
            continue;
        }
        if in_quotes {
            continue;
        }
        if let Some(i) = CANDIDATES.iter().position(|c| c.as_byte() == byte) {
            counts[i] += 1;
        }
    }
    counts
}
