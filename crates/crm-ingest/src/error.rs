//! Error types for lead file ingestion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading and parsing an import file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Import file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the configured size limit.
    #[error("file {path} is {size} bytes, larger than the {max_size} byte limit")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    // === CSV Parsing Errors ===
    /// The CSV reader rejected the text.
    #[error("failed to parse CSV{}: {message}", line_suffix(.line))]
    CsvParse { line: Option<u64>, message: String },
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        Self::CsvParse {
            line: err.position().map(csv::Position::line),
            message: err.to_string(),
        }
    }
}

fn line_suffix(line: &Option<u64>) -> String {
    match line {
        Some(line) => format!(" near line {line}"),
        None => String::new(),
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
