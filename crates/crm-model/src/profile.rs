//! Import profile: the static configuration of one import target.
//!
//! A profile is built once (from defaults or a TOML file) and passed
//! explicitly into every pipeline stage.
//!
//! ```toml
//! record_type = "CRM Lead"
//! required = ["First Name", "Organization"]
//! vocabulary_fields = ["status"]
//!
//! [columns]
//! "First Name" = "first_name"
//! "Company" = "organization"
//! ```
//!
//! Omitted keys keep their defaults.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::columns::{ColumnSpec, RequiredColumnSet};
use crate::error::{ProfileError, Result};
use crate::field::LeadField;

/// Record type name used by the CRM lead profile.
pub const CRM_LEAD_RECORD_TYPE: &str = "CRM Lead";

/// Configuration for one import target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportProfile {
    /// Record type passed to the schema provider and record store.
    pub record_type: String,
    pub columns: ColumnSpec,
    pub required: RequiredColumnSet,
    /// Fields whose values are checked against the schema's select options.
    pub vocabulary_fields: Vec<LeadField>,
}

impl ImportProfile {
    /// The CRM lead profile with identity columns required.
    pub fn crm_lead() -> Self {
        Self {
            record_type: CRM_LEAD_RECORD_TYPE.to_string(),
            columns: ColumnSpec::crm_lead(),
            required: RequiredColumnSet::identity(),
            vocabulary_fields: vec![LeadField::Status],
        }
    }

    #[must_use]
    pub fn with_required(mut self, required: RequiredColumnSet) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn with_columns(mut self, columns: ColumnSpec) -> Self {
        self.columns = columns;
        self
    }

    #[must_use]
    pub fn with_vocabulary_fields(mut self, fields: Vec<LeadField>) -> Self {
        self.vocabulary_fields = fields;
        self
    }

    /// Check that every required column is mapped.
    pub fn validate(&self) -> Result<()> {
        for column in self.required.iter() {
            if !self.columns.is_known(column) {
                return Err(ProfileError::UnmappedRequired {
                    column: column.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Parse a profile from TOML text, filling omitted keys from [`ImportProfile::crm_lead`].
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self> {
        let file: ProfileFile = toml::from_str(text).map_err(|e| ProfileError::Toml {
            path: origin.to_path_buf(),
            source: e,
        })?;
        let mut profile = Self::crm_lead();
        if let Some(record_type) = file.record_type {
            profile.record_type = record_type;
        }
        if let Some(columns) = file.columns {
            profile.columns = ColumnSpec::new(columns)?;
        }
        if let Some(required) = file.required {
            profile.required = RequiredColumnSet::new(required);
        }
        if let Some(fields) = file.vocabulary_fields {
            profile.vocabulary_fields = fields;
        }
        profile.validate()?;
        Ok(profile)
    }

    /// Load a profile from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ProfileError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&text, path)
    }
}

impl Default for ImportProfile {
    fn default() -> Self {
        Self::crm_lead()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProfileFile {
    record_type: Option<String>,
    required: Option<Vec<String>>,
    vocabulary_fields: Option<Vec<LeadField>>,
    columns: Option<BTreeMap<String, LeadField>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> &'static Path {
        Path::new("profile.toml")
    }

    #[test]
    fn default_profile_is_valid() {
        let profile = ImportProfile::default();
        assert!(profile.validate().is_ok());
        assert_eq!(profile.record_type, "CRM Lead");
        assert_eq!(profile.vocabulary_fields, vec![LeadField::Status]);
    }

    #[test]
    fn empty_toml_keeps_defaults() {
        let profile = ImportProfile::from_toml_str("", origin()).unwrap();
        assert_eq!(profile, ImportProfile::crm_lead());
    }

    #[test]
    fn toml_overrides_columns_and_required() {
        let text = r#"
record_type = "Partner Lead"
required = ["Company"]
vocabulary_fields = ["status", "no_of_employees"]

[columns]
"Given Name" = "first_name"
"Company" = "organization"
"Stage" = "status"
"#;
        let profile = ImportProfile::from_toml_str(text, origin()).unwrap();
        assert_eq!(profile.record_type, "Partner Lead");
        assert_eq!(profile.columns.field_for("Company"), Some(LeadField::Organization));
        assert!(!profile.columns.is_known("First Name"));
        assert!(profile.required.contains("Company"));
        assert_eq!(
            profile.vocabulary_fields,
            vec![LeadField::Status, LeadField::NoOfEmployees]
        );
    }

    #[test]
    fn toml_rejects_unknown_fields() {
        let text = "[columns]\n\"Fax\" = \"fax\"\n";
        let err = ImportProfile::from_toml_str(text, origin()).unwrap_err();
        assert!(matches!(err, ProfileError::Toml { .. }));
    }

    #[test]
    fn required_columns_must_be_mapped() {
        let text = "required = [\"Fax\"]\n";
        let err = ImportProfile::from_toml_str(text, origin()).unwrap_err();
        assert!(matches!(err, ProfileError::UnmappedRequired { column } if column == "Fax"));
    }
}
