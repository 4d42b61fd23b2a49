//! CSV dialect detection from the header line.

use thiserror::Error;

/// Delimiters considered by the sniffer, in tie-break order.
pub const DELIMITER_CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Delimiter and quoting conventions of one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    pub delimiter: u8,
    pub quote: u8,
    /// Quotes inside quoted fields are written as two quote characters.
    pub double_quote: bool,
    pub escape: Option<u8>,
    /// Whitespace after a delimiter is not part of the field.
    pub skip_initial_space: bool,
}

impl Default for Dialect {
    /// Comma-delimited, double-quote quoting (spreadsheet export default).
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            double_quote: true,
            escape: None,
            skip_initial_space: false,
        }
    }
}

impl Dialect {
    /// Printable name of the delimiter.
    pub fn delimiter_name(&self) -> String {
        match self.delimiter {
            b'\t' => "tab".to_string(),
            b' ' => "space".to_string(),
            other => (other as char).to_string(),
        }
    }
}

/// Why a sample could not be sniffed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SniffError {
    #[error("sample is empty")]
    EmptySample,

    #[error("no delimiter found in sample")]
    NoDelimiter,

    #[error("unbalanced {quote} quotes in sample")]
    UnbalancedQuotes { quote: char },
}

/// Infer the dialect of a single line (terminator optional).
pub fn sniff(sample: &str) -> Result<Dialect, SniffError> {
    let line = sample.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Err(SniffError::EmptySample);
    }

    let bytes = line.as_bytes();
    let quote = detect_quote(bytes);
    if bytes.iter().filter(|b| **b == quote).count() % 2 != 0 {
        return Err(SniffError::UnbalancedQuotes {
            quote: quote as char,
        });
    }

    let mut counts = [0usize; DELIMITER_CANDIDATES.len()];
    let mut spaced = [0usize; DELIMITER_CANDIDATES.len()];
    let mut in_quotes = false;
    for (pos, byte) in bytes.iter().enumerate() {
        if *byte == quote {
            in_quotes = !in_quotes;
            continue;
        }
        if in_quotes {
            continue;
        }
        if let Some(slot) = DELIMITER_CANDIDATES.iter().position(|c| c == byte) {
            counts[slot] += 1;
            if bytes.get(pos + 1) == Some(&b' ') {
                spaced[slot] += 1;
            }
        }
    }

    // First candidate wins ties, so plain commas beat everything else.
    let mut best: Option<usize> = None;
    for slot in 0..counts.len() {
        if counts[slot] > 0 && best.is_none_or(|b| counts[slot] > counts[b]) {
            best = Some(slot);
        }
    }
    let slot = best.ok_or(SniffError::NoDelimiter)?;

    Ok(Dialect {
        delimiter: DELIMITER_CANDIDATES[slot],
        quote,
        double_quote: true,
        escape: None,
        skip_initial_space: spaced[slot] == counts[slot],
    })
}

/// Single quotes count as the quote character only when they open a field.
fn detect_quote(bytes: &[u8]) -> u8 {
    if bytes.contains(&b'"') {
        return b'"';
    }
    let opens_field = |pos: usize| {
        let before = bytes[..pos].iter().rev().find(|b| **b != b' ');
        before.is_none_or(|b| DELIMITER_CANDIDATES.contains(b))
    };
    let single_quoted = bytes
        .iter()
        .enumerate()
        .any(|(pos, b)| *b == b'\'' && opens_field(pos));
    if single_quoted { b'\'' } else { b'"' }
}

/// The first line of `text`, including its terminator.
pub fn first_line(text: &str) -> &str {
    match text.find('\n') {
        Some(end) => &text[..=end],
        None => text,
    }
}

/// Sniff the first line of `text`, using [`Dialect::default`] when detection fails.
pub fn sniff_or_default(text: &str) -> Dialect {
    match sniff(first_line(text)) {
        Ok(dialect) => {
            tracing::debug!(delimiter = %dialect.delimiter_name(), "sniffed dialect");
            dialect
        }
        Err(error) => {
            tracing::debug!(%error, "dialect detection failed, using default");
            Dialect::default()
        }
    }
}
