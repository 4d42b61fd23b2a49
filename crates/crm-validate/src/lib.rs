//! Lead import validation.
//!
//! Runs after ingestion and before persistence:
//!
//! - [`check_header`]: required columns present, unknown columns listed
//! - [`map_row`]: cells copied onto a fixed-shape [`LeadPayload`](crm_model::LeadPayload)
//! - [`rules`]: row length, blank rows, identity, vocabulary, lead name

mod error;
mod header;
mod mapper;
pub mod rules;

pub use error::{HeaderError, RowRejection};
pub use header::{HeaderCheck, HeaderIndex, check_header};
pub use mapper::map_row;
pub use rules::{
    check_identity, check_row_length, check_vocabulary, derive_lead_name, enrich, is_blank_row,
};
