//! Per-row checks and enrichment.
//!
//! Each check is a separate function so the importer can run them in a fixed
//! order and stop at the first rejection.

use crm_model::{LeadField, LeadPayload, LeadRecord, SelectFieldOptions};

use crate::error::RowRejection;

/// Reject a row whose cell count differs from the header's.
pub fn check_row_length<S>(row: &[S], header_len: usize) -> Result<(), RowRejection> {
    if row.len() == header_len {
        Ok(())
    } else {
        Err(RowRejection::ColumnCount {
            found: row.len(),
            expected: header_len,
        })
    }
}

/// True when every cell is empty or whitespace. An empty row is blank.
pub fn is_blank_row<S: AsRef<str>>(row: &[S]) -> bool {
    row.iter().all(|cell| cell.as_ref().trim().is_empty())
}

/// A lead needs a first name or an organization.
pub fn check_identity(payload: &LeadPayload) -> Result<(), RowRejection> {
    if payload.first_name.is_empty() && payload.organization.is_empty() {
        return Err(RowRejection::MissingIdentity);
    }
    Ok(())
}

/// Check each governed field against its allowed values.
///
/// Empty values pass. A field with no options in `options` is not checked.
/// Membership is exact, including case.
pub fn check_vocabulary(
    payload: &LeadPayload,
    fields: &[LeadField],
    options: &SelectFieldOptions,
) -> Result<(), RowRejection> {
    for &field in fields {
        let value = payload.get(field);
        if value.is_empty() {
            continue;
        }
        let Some(allowed) = options
            .allowed(field.as_str())
            .filter(|allowed| !allowed.is_empty())
        else {
            continue;
        };
        if !allowed.contains(value) {
            return Err(RowRejection::InvalidChoice {
                field,
                value: value.to_string(),
                allowed: allowed.iter().cloned().collect(),
            });
        }
    }
    Ok(())
}

/// Salutation, first name and last name joined by single spaces.
pub fn derive_lead_name(payload: &LeadPayload) -> String {
    [
        payload.salutation.as_str(),
        payload.first_name.as_str(),
        payload.last_name.as_str(),
    ]
    .iter()
    .map(|part| part.trim())
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}

pub fn enrich(payload: LeadPayload) -> LeadRecord {
    let lead_name = derive_lead_name(&payload);
    LeadRecord::new(payload, lead_name)
}
