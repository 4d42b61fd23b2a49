//! Import a CSV file from disk.
//!
//! The CLI plays the transport: it reads the upload from a path, picks the
//! store and configuration, and hands the bytes to [`Importer`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use sha2::Digest;
use tracing::{info, warn};

use crm_import::{
    ImportOutcome, ImportResult, Importer, JsonLinesStore, MemoryRecordStore, RecordStore,
    StaticSchemaProvider,
};
use crm_ingest::{MAX_CSV_FILE_SIZE, read_file_bytes};
use crm_model::ImportProfile;

/// Everything needed for one import run.
#[derive(Debug, Clone)]
pub struct ImportRequest {
    pub file: PathBuf,
    pub dry_run: bool,
    pub profile: Option<PathBuf>,
    pub schema: Option<PathBuf>,
    /// JSON Lines file receiving committed leads.
    pub store: Option<PathBuf>,
    pub encoding: Option<String>,
    pub echo_rows: bool,
    pub log_data: bool,
    pub max_file_size: u64,
}

impl ImportRequest {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            dry_run: false,
            profile: None,
            schema: None,
            store: None,
            encoding: None,
            echo_rows: false,
            log_data: false,
            max_file_size: MAX_CSV_FILE_SIZE,
        }
    }
}

/// A finished run with the input it was computed from.
#[derive(Debug, Clone, Serialize)]
pub struct ImportRun {
    pub file: PathBuf,
    /// SHA-256 of the uploaded bytes.
    pub sha256: String,
    pub store: Option<PathBuf>,
    pub outcome: ImportOutcome,
}

impl ImportRun {
    pub fn has_errors(&self) -> bool {
        self.outcome.result().is_some_and(ImportResult::has_errors)
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(sha2::Sha256::digest(bytes))
}

pub fn load_profile(path: Option<&Path>) -> Result<ImportProfile> {
    match path {
        Some(path) => ImportProfile::load(path)
            .with_context(|| format!("load profile {}", path.display())),
        None => Ok(ImportProfile::crm_lead()),
    }
}

pub fn load_schema(path: Option<&Path>) -> Result<StaticSchemaProvider> {
    match path {
        Some(path) => StaticSchemaProvider::load(path)
            .with_context(|| format!("load schema {}", path.display())),
        None => Ok(StaticSchemaProvider::crm_lead()),
    }
}

pub fn run_import(request: &ImportRequest) -> Result<ImportRun> {
    let profile = load_profile(request.profile.as_deref())?;
    let schema = load_schema(request.schema.as_deref())?;

    let bytes = read_file_bytes(&request.file, request.max_file_size)
        .with_context(|| format!("read {}", request.file.display()))?;
    let sha256 = sha256_hex(&bytes);
    info!(file = %request.file.display(), %sha256, bytes = bytes.len(), "read upload");

    let mut memory;
    let mut json_lines;
    let store: &mut dyn RecordStore = match &request.store {
        Some(path) => {
            json_lines = JsonLinesStore::open(path)
                .with_context(|| format!("open store {}", path.display()))?;
            &mut json_lines
        }
        None => {
            if !request.dry_run {
                warn!("no --store given; committed leads are kept in memory only");
            }
            memory = MemoryRecordStore::new();
            &mut memory
        }
    };

    let outcome = Importer::new(&profile, &schema, store)
        .with_encoding(request.encoding.clone())
        .with_row_echo(request.echo_rows)
        .with_data_logging(request.log_data)
        .import_bytes(&bytes, request.dry_run)
        .with_context(|| format!("import {}", request.file.display()))?;

    Ok(ImportRun {
        file: request.file.clone(),
        sha256,
        store: request.store.clone(),
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_of_known_input() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn defaults_without_config_files() {
        assert_eq!(load_profile(None).unwrap(), ImportProfile::crm_lead());
        assert_eq!(load_schema(None).unwrap(), StaticSchemaProvider::crm_lead());
    }
}
