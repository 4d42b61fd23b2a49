//! Lead import data model.
//!
//! Types shared by every stage of the lead import pipeline:
//!
//! - [`LeadField`]: the closed set of target fields
//! - [`ColumnSpec`] / [`RequiredColumnSet`]: source column configuration
//! - [`LeadPayload`] / [`LeadRecord`]: mapped rows and enriched records
//! - [`SelectFieldOptions`]: allowed values for select fields
//! - [`ImportProfile`]: the bundle of the above passed into each run

mod columns;
mod error;
mod field;
mod options;
mod payload;
mod profile;

pub use columns::{ColumnMapping, ColumnSpec, RequiredColumnSet};
pub use error::{ProfileError, RecordError, Result};
pub use field::LeadField;
pub use options::{SelectFieldOptions, parse_select_options};
pub use payload::{LeadPayload, LeadRecord};
pub use profile::{CRM_LEAD_RECORD_TYPE, ImportProfile};
