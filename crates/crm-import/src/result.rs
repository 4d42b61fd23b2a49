//! Import results and the transport-facing response.

use std::fmt;

use serde::Serialize;

use crm_ingest::Row;

/// One rejected data row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowError {
    /// Row number in the file; the header is line 1.
    pub line: usize,
    pub message: String,
}

impl RowError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: {}", self.line, self.message)
    }
}

/// Aggregate outcome of processing every data row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportResult {
    pub dry_run: bool,
    /// Records actually persisted. Always zero in a dry run.
    pub created: usize,
    /// Data rows with at least one non-blank cell.
    pub non_blank_rows: usize,
    /// Every rejection, in file order.
    pub errors: Vec<RowError>,
    /// Encoding the upload was decoded with.
    pub encoding: String,
    pub delimiter: char,
    /// Parsed rows, header included, when row echo is on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Row>>,
}

impl ImportResult {
    /// Reported record count.
    ///
    /// A commit reports what was created. A dry run estimates it as non-blank
    /// rows minus errors, floored at zero.
    pub fn inserted(&self) -> usize {
        if self.dry_run {
            self.non_blank_rows.saturating_sub(self.errors.len())
        } else {
            self.created
        }
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Outcome of a run that got past the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImportOutcome {
    /// The file had no data rows after the header.
    NoRows,
    Completed(ImportResult),
}

impl ImportOutcome {
    pub fn result(&self) -> Option<&ImportResult> {
        match self {
            Self::NoRows => None,
            Self::Completed(result) => Some(result),
        }
    }
}

/// What the upload entry point hands back to the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ImportResponse {
    Report { report: String },
    Failure { exc: String },
}

impl ImportResponse {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }
}
