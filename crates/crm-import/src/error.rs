//! Error types for the import pipeline.

use std::path::PathBuf;

use thiserror::Error;

use crm_ingest::IngestError;
use crm_model::RecordError;
use crm_validate::HeaderError;

/// Failures that abort an import run.
///
/// Row-level problems never show up here; they are collected as
/// [`RowError`](crate::RowError)s in the result.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The transport delivered no file.
    #[error("File not found in request")]
    MissingFile,

    #[error(transparent)]
    Header(#[from] HeaderError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Ingest(#[from] IngestError),
}

/// Failures from a schema provider.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("unknown record type: {record_type}")]
    UnknownRecordType { record_type: String },

    #[error("failed to read schema file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse schema file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Failures from a record store. Rendered into row errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Invalid(#[from] RecordError),

    #[error("Duplicate {field}: {value} already exists")]
    Duplicate { field: &'static str, value: String },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("corrupt store {path} at line {line}: {message}")]
    Corrupt {
        path: PathBuf,
        line: usize,
        message: String,
    },
}

/// Result type for import runs.
pub type Result<T> = std::result::Result<T, ImportError>;
