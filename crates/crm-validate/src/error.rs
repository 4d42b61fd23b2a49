//! Header-level and row-level validation failures.

use thiserror::Error;

use crm_model::LeadField;

/// Header defects. These abort the whole import.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    #[error("Missing required column(s): {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },
}

/// Why a single data row was rejected.
///
/// The message is what the import report shows after `Line N: `.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowRejection {
    #[error("Row has {found} columns, but header expects {expected} columns.")]
    ColumnCount { found: usize, expected: usize },

    #[error("missing first_name/organization")]
    MissingIdentity,

    #[error("invalid value '{value}' for {field}. Allowed: {}", .allowed.join(", "))]
    InvalidChoice {
        field: LeadField,
        value: String,
        /// Sorted allowed values.
        allowed: Vec<String>,
    },
}
