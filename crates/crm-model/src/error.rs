//! Error types for the lead model.

use std::path::PathBuf;

use thiserror::Error;

use crate::field::LeadField;

/// Errors raised while building or loading an import profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// Field name does not exist on the lead record.
    #[error("unknown lead field '{name}'")]
    UnknownField { name: String },

    /// Two source columns map to the same target field.
    #[error("columns '{first}' and '{second}' both map to {field}")]
    DuplicateField {
        field: LeadField,
        first: String,
        second: String,
    },

    /// A required column has no mapping to a target field.
    #[error("required column '{column}' is not mapped to a lead field")]
    UnmappedRequired { column: String },

    /// Profile file could not be read.
    #[error("failed to read profile {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Profile file is not valid TOML for a profile.
    #[error("failed to parse profile {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Record-level validation failures.
///
/// Messages are shown verbatim in import reports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("{value} is not a valid Email Address")]
    InvalidEmail { value: String },

    #[error("Annual Revenue must be a non-negative number, got '{value}'")]
    InvalidAnnualRevenue { value: String },

    #[error("Website '{value}' must not contain spaces")]
    InvalidWebsite { value: String },
}

/// Result type for profile operations.
pub type Result<T> = std::result::Result<T, ProfileError>;
