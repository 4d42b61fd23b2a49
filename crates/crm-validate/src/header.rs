//! Header row validation against an import profile.

use std::collections::BTreeMap;

use crm_model::ImportProfile;

use crate::error::HeaderError;

/// Column name to position lookup, built once from the header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderIndex {
    positions: BTreeMap<String, usize>,
    len: usize,
}

impl HeaderIndex {
    /// Index trimmed header names. A repeated name resolves to its last position.
    pub fn new<S: AsRef<str>>(header: &[S]) -> Self {
        let positions = header
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.as_ref().trim().to_string(), idx))
            .collect();
        Self {
            positions,
            len: header.len(),
        }
    }

    /// Position of a column, or `None` when the column is absent.
    pub fn position(&self, column: &str) -> Option<usize> {
        self.positions.get(column).copied()
    }

    /// Number of header cells (the expected row length).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Outcome of a successful header check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCheck {
    /// Trimmed header cells in file order.
    pub columns: Vec<String>,
    pub index: HeaderIndex,
    /// Header cells the profile does not map, in file order.
    pub unknown: Vec<String>,
}

/// Trim the header, require the profile's columns, and list unknown columns.
///
/// Missing required columns fail the whole run. Unknown columns are only
/// reported; they are ignored by the row mapper.
pub fn check_header<S: AsRef<str>>(
    header: &[S],
    profile: &ImportProfile,
) -> Result<HeaderCheck, HeaderError> {
    let columns: Vec<String> = header.iter().map(|h| h.as_ref().trim().to_string()).collect();

    let missing = profile.required.missing_from(&columns);
    if !missing.is_empty() {
        return Err(HeaderError::MissingColumns { columns: missing });
    }

    let unknown: Vec<String> = columns
        .iter()
        .filter(|c| !profile.columns.is_known(c))
        .cloned()
        .collect();
    if !unknown.is_empty() {
        tracing::debug!(count = unknown.len(), "header has unmapped columns");
    }

    let index = HeaderIndex::new(&columns);
    Ok(HeaderCheck {
        columns,
        index,
        unknown,
    })
}
