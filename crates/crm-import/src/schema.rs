//! A schema provider backed by a fixed option table.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crm_model::{CRM_LEAD_RECORD_TYPE, SelectFieldOptions, parse_select_options};

use crate::collab::SchemaProvider;
use crate::error::SchemaError;

/// Lead statuses offered by the built-in CRM Lead schema.
pub const LEAD_STATUSES: [&str; 6] = [
    "New",
    "Contacted",
    "Nurture",
    "Qualified",
    "Unqualified",
    "Junk",
];

/// Employee count bands offered by the built-in CRM Lead schema.
pub const EMPLOYEE_BANDS: [&str; 6] = ["1-10", "11-50", "51-200", "201-500", "501-1000", "1000+"];

/// Serves select options for a single record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticSchemaProvider {
    record_type: String,
    options: SelectFieldOptions,
}

impl StaticSchemaProvider {
    pub fn new(record_type: impl Into<String>, options: SelectFieldOptions) -> Self {
        Self {
            record_type: record_type.into(),
            options,
        }
    }

    /// Built-in options for the CRM Lead record type.
    pub fn crm_lead() -> Self {
        let options = SelectFieldOptions::new()
            .with_field("status", LEAD_STATUSES)
            .with_field("no_of_employees", EMPLOYEE_BANDS);
        Self::new(CRM_LEAD_RECORD_TYPE, options)
    }

    pub fn record_type(&self) -> &str {
        &self.record_type
    }

    pub fn options(&self) -> &SelectFieldOptions {
        &self.options
    }

    /// Parse a schema file.
    ///
    /// ```toml
    /// record_type = "CRM Lead"
    ///
    /// [fields]
    /// status = ["New", "Contacted"]
    /// no_of_employees = """
    /// 1-10
    /// 11-50
    /// """
    /// ```
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, SchemaError> {
        let file: SchemaFile = toml::from_str(text).map_err(|source| SchemaError::Toml {
            path: origin.to_path_buf(),
            source,
        })?;

        let mut options = SelectFieldOptions::new();
        for (field, values) in file.fields {
            match values {
                OptionValues::List(list) => options.insert(field, list),
                OptionValues::Text(text) => options.insert(field, parse_select_options(&text)),
            }
        }

        let record_type = file
            .record_type
            .unwrap_or_else(|| CRM_LEAD_RECORD_TYPE.to_string());
        Ok(Self::new(record_type, options))
    }

    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let text = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let provider = Self::from_toml_str(&text, path)?;
        tracing::debug!(
            path = %path.display(),
            record_type = %provider.record_type,
            "loaded schema"
        );
        Ok(provider)
    }
}

impl Default for StaticSchemaProvider {
    fn default() -> Self {
        Self::crm_lead()
    }
}

impl SchemaProvider for StaticSchemaProvider {
    fn select_options(&self, record_type: &str) -> Result<SelectFieldOptions, SchemaError> {
        if record_type != self.record_type {
            return Err(SchemaError::UnknownRecordType {
                record_type: record_type.to_string(),
            });
        }
        Ok(self.options.clone())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaFile {
    record_type: Option<String>,
    #[serde(default)]
    fields: BTreeMap<String, OptionValues>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OptionValues {
    List(Vec<String>),
    Text(String),
}
