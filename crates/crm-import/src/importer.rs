//! The import run: parse, check the header, process rows, summarise.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, info_span, warn};

use crm_ingest::{Table, read_table, read_table_bytes};
use crm_model::{ImportProfile, SelectFieldOptions};
use crm_validate::{
    HeaderCheck, RowRejection, check_header, check_identity, check_row_length, check_vocabulary,
    enrich, is_blank_row, map_row,
};

use crate::collab::{DiagnosticSink, RecordStore, SchemaProvider, TracingSink};
use crate::error::{ImportError, Result, StoreError};
use crate::report::render_outcome;
use crate::result::{ImportOutcome, ImportResponse, ImportResult, RowError};

/// Title of the diagnostic raised for unmapped header columns.
pub const UNKNOWN_HEADERS_TITLE: &str = "Import Leads: Unknown headers";

static TRACING_SINK: TracingSink = TracingSink;

/// Where an import run currently is. Rows are only processed after the
/// header has been validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportPhase {
    Parsing,
    HeaderValidated,
    ProcessingRows,
    Finalized,
}

#[derive(Debug, Error)]
enum RowFailure {
    #[error(transparent)]
    Rejected(#[from] RowRejection),
    #[error(transparent)]
    Store(#[from] StoreError),
}

enum RowStep {
    Blank,
    Accepted,
}

/// Runs lead imports against a profile, a schema provider and a record store.
///
/// One importer may run several imports; each run fetches its own snapshot
/// of select options.
pub struct Importer<'a> {
    profile: &'a ImportProfile,
    schema: &'a dyn SchemaProvider,
    store: &'a mut dyn RecordStore,
    diagnostics: &'a dyn DiagnosticSink,
    encoding: Option<String>,
    echo_rows: bool,
    log_data: bool,
    phase: ImportPhase,
}

impl<'a> Importer<'a> {
    pub fn new(
        profile: &'a ImportProfile,
        schema: &'a dyn SchemaProvider,
        store: &'a mut dyn RecordStore,
    ) -> Self {
        Self {
            profile,
            schema,
            store,
            diagnostics: &TRACING_SINK,
            encoding: None,
            echo_rows: false,
            log_data: false,
            phase: ImportPhase::Parsing,
        }
    }

    /// Send advisory diagnostics somewhere other than the log.
    #[must_use]
    pub fn with_diagnostics(mut self, sink: &'a dyn DiagnosticSink) -> Self {
        self.diagnostics = sink;
        self
    }

    /// Decode uploads with this encoding label instead of detecting one.
    #[must_use]
    pub fn with_encoding(mut self, label: Option<String>) -> Self {
        self.encoding = label;
        self
    }

    /// Include every parsed row in the result and report.
    #[must_use]
    pub fn with_row_echo(mut self, enabled: bool) -> Self {
        self.echo_rows = enabled;
        self
    }

    /// Allow cell values in debug logs.
    #[must_use]
    pub fn with_data_logging(mut self, enabled: bool) -> Self {
        self.log_data = enabled;
        self
    }

    pub fn phase(&self) -> ImportPhase {
        self.phase
    }

    /// Transport entry point: always answers with a report or a failure.
    pub fn import_upload(&mut self, upload: Option<&[u8]>, dry_run: bool) -> ImportResponse {
        let outcome = match upload {
            Some(bytes) => self.import_bytes(bytes, dry_run),
            None => Err(ImportError::MissingFile),
        };
        match outcome {
            Ok(outcome) => ImportResponse::Report {
                report: render_outcome(&outcome),
            },
            Err(err) => {
                warn!(error = %err, "import failed");
                ImportResponse::Failure {
                    exc: err.to_string(),
                }
            }
        }
    }

    pub fn import_bytes(&mut self, bytes: &[u8], dry_run: bool) -> Result<ImportOutcome> {
        self.phase = ImportPhase::Parsing;
        let table = read_table_bytes(bytes, self.encoding.as_deref())?;
        self.run(&table, dry_run)
    }

    /// Import text that is already decoded.
    pub fn import_text(&mut self, text: &str, dry_run: bool) -> Result<ImportOutcome> {
        self.phase = ImportPhase::Parsing;
        let table = read_table(text)?;
        self.run(&table, dry_run)
    }

    fn run(&mut self, table: &Table, dry_run: bool) -> Result<ImportOutcome> {
        let span = info_span!(
            "import",
            record_type = %self.profile.record_type,
            dry_run,
            rows = table.rows.len(),
        );
        let _enter = span.enter();

        let Some(header) = table.header().filter(|_| table.has_data()) else {
            info!("no data rows");
            self.phase = ImportPhase::Finalized;
            return Ok(ImportOutcome::NoRows);
        };

        let check = check_header(header, self.profile)?;
        self.phase = ImportPhase::HeaderValidated;
        if !check.unknown.is_empty() {
            self.diagnostics
                .log_error(UNKNOWN_HEADERS_TITLE, &check.unknown.join("\n"));
        }

        let options = self.schema.select_options(&self.profile.record_type)?;
        self.phase = ImportPhase::ProcessingRows;

        let mut created = 0;
        let mut non_blank_rows = 0;
        let mut errors = Vec::new();
        for (idx, row) in table.data_rows().iter().enumerate() {
            let line = idx + 2;
            if !is_blank_row(row) {
                non_blank_rows += 1;
            }
            match self.process_row(row, &check, &options, dry_run) {
                Ok(RowStep::Blank) => debug!(line, "skipped blank row"),
                Ok(RowStep::Accepted) => {
                    if !dry_run {
                        created += 1;
                    }
                }
                Err(failure) => {
                    if self.log_data {
                        debug!(line, reason = %failure, "row rejected");
                    } else {
                        debug!(line, "row rejected");
                    }
                    errors.push(RowError::new(line, failure.to_string()));
                }
            }
        }

        self.phase = ImportPhase::Finalized;
        let result = ImportResult {
            dry_run,
            created,
            non_blank_rows,
            errors,
            encoding: table.encoding.to_string(),
            delimiter: char::from(table.dialect.delimiter),
            rows: self.echo_rows.then(|| table.rows.clone()),
        };
        info!(
            inserted = result.inserted(),
            errors = result.error_count(),
            "import finished"
        );
        Ok(ImportOutcome::Completed(result))
    }

    fn process_row(
        &mut self,
        row: &[String],
        check: &HeaderCheck,
        options: &SelectFieldOptions,
        dry_run: bool,
    ) -> std::result::Result<RowStep, RowFailure> {
        check_row_length(row, check.index.len())?;
        if is_blank_row(row) {
            return Ok(RowStep::Blank);
        }

        let payload = map_row(row, &check.index, &self.profile.columns);
        if self.log_data {
            debug!(?payload, "mapped row");
        }
        check_identity(&payload)?;
        check_vocabulary(&payload, &self.profile.vocabulary_fields, options)?;

        let record = enrich(payload);
        let record_type = self.profile.record_type.as_str();
        if dry_run {
            self.store.validate(record_type, &record)?;
        } else {
            self.store.insert(record_type, &record)?;
        }
        Ok(RowStep::Accepted)
    }
}
