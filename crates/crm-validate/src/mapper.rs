//! Mapping a raw row onto a lead payload.

use crm_model::{ColumnSpec, LeadPayload};

use crate::header::HeaderIndex;

/// Copy trimmed cells into the payload fields named by `columns`.
///
/// A column missing from the header, or a cell past the end of the row,
/// leaves its field empty. Unknown columns are ignored.
pub fn map_row<S: AsRef<str>>(row: &[S], index: &HeaderIndex, columns: &ColumnSpec) -> LeadPayload {
    let mut payload = LeadPayload::default();
    for mapping in columns.iter() {
        let value = index
            .position(&mapping.column)
            .and_then(|pos| row.get(pos))
            .map(|cell| cell.as_ref().trim())
            .unwrap_or("");
        payload.set(mapping.field, value);
    }
    payload
}
