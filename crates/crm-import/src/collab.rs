//! Collaborators the importer talks to.
//!
//! The schema provider, record store and diagnostic sink live outside the
//! pipeline. Each is a trait so callers can plug in their own backends.

use std::cell::RefCell;

use crm_model::{LeadRecord, SelectFieldOptions};

use crate::error::{SchemaError, StoreError};

/// Source of select-field options for a record type.
pub trait SchemaProvider {
    /// Allowed values per select field. Called once per import run.
    fn select_options(&self, record_type: &str) -> Result<SelectFieldOptions, SchemaError>;
}

/// Destination for imported records.
pub trait RecordStore {
    /// Run the store's validation without persisting (dry runs).
    fn validate(&self, _record_type: &str, record: &LeadRecord) -> Result<(), StoreError> {
        record.validate()?;
        Ok(())
    }

    /// Persist one record. Each insert stands alone; there is no run-wide
    /// transaction.
    fn insert(&mut self, record_type: &str, record: &LeadRecord) -> Result<(), StoreError>;
}

/// Sink for advisory diagnostics. Never affects control flow.
pub trait DiagnosticSink {
    fn log_error(&self, title: &str, body: &str);
}

/// Emits diagnostics as `warn!` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn log_error(&self, title: &str, body: &str) {
        tracing::warn!(title, body, "import diagnostic");
    }
}

/// A diagnostic entry kept by [`CollectingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub title: String,
    pub body: String,
}

/// Keeps diagnostics in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    entries: RefCell<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn log_error(&self, title: &str, body: &str) {
        self.entries.borrow_mut().push(Diagnostic {
            title: title.to_string(),
            body: body.to_string(),
        });
    }
}
