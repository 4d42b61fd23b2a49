//! Lead CSV import pipeline.
//!
//! [`Importer`] ties the pieces together: bytes are decoded and parsed by
//! `crm-ingest`, the header and rows are checked by `crm-validate`, accepted
//! records go to a [`RecordStore`], and the run ends in an [`ImportResult`]
//! rendered by [`render_report`].
//!
//! # Example
//!
//! ```ignore
//! use crm_import::{Importer, MemoryRecordStore, StaticSchemaProvider, render_outcome};
//! use crm_model::ImportProfile;
//!
//! let profile = ImportProfile::crm_lead();
//! let schema = StaticSchemaProvider::crm_lead();
//! let mut store = MemoryRecordStore::new();
//! let outcome = Importer::new(&profile, &schema, &mut store)
//!     .import_bytes(b"First Name,Organization\nAda,Engines\n", true)?;
//! println!("{}", render_outcome(&outcome));
//! ```

mod collab;
mod error;
mod importer;
mod report;
mod result;
mod schema;
mod store;

// === Error Types ===
pub use error::{ImportError, Result, SchemaError, StoreError};

// === Collaborators ===
pub use collab::{CollectingSink, Diagnostic, DiagnosticSink, RecordStore, SchemaProvider, TracingSink};
pub use schema::{EMPLOYEE_BANDS, LEAD_STATUSES, StaticSchemaProvider};
pub use store::{JsonLinesStore, MemoryRecordStore};

// === Pipeline ===
pub use importer::{ImportPhase, Importer, UNKNOWN_HEADERS_TITLE};
pub use result::{ImportOutcome, ImportResponse, ImportResult, RowError};

// === Report ===
pub use report::{MAX_REPORTED_ERRORS, NO_ROWS_MESSAGE, render_outcome, render_report};
