//! Source column configuration: column-to-field mapping and required columns.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{ProfileError, Result};
use crate::field::LeadField;

/// One source column and the lead field it feeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub column: String,
    pub field: LeadField,
}

/// Mapping from CSV column names to lead fields.
///
/// Order is kept for display only; mapping does not depend on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    mappings: Vec<ColumnMapping>,
}

impl ColumnSpec {
    /// Build a mapping, rejecting two columns that feed the same field.
    pub fn new<I, S>(mappings: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, LeadField)>,
        S: Into<String>,
    {
        let mut spec = Self {
            mappings: Vec::new(),
        };
        for (column, field) in mappings {
            let column = column.into().trim().to_string();
            if let Some(existing) = spec.mappings.iter().find(|m| m.field == field) {
                return Err(ProfileError::DuplicateField {
                    field,
                    first: existing.column.clone(),
                    second: column,
                });
            }
            spec.mappings.retain(|m| m.column != column);
            spec.mappings.push(ColumnMapping { column, field });
        }
        Ok(spec)
    }

    /// The CRM lead column layout.
    pub fn crm_lead() -> Self {
        let mappings = [
            ("Salutation", LeadField::Salutation),
            ("First Name", LeadField::FirstName),
            ("Last Name", LeadField::LastName),
            ("Email", LeadField::Email),
            ("Mobile No", LeadField::MobileNo),
            ("Gender", LeadField::Gender),
            ("Status", LeadField::Status),
            ("Organization", LeadField::Organization),
            ("Website", LeadField::Website),
            ("Industry", LeadField::Industry),
            ("Annual Revenue", LeadField::AnnualRevenue),
            ("No. of Employees", LeadField::NoOfEmployees),
        ];
        Self {
            mappings: mappings
                .into_iter()
                .map(|(column, field)| ColumnMapping {
                    column: column.to_string(),
                    field,
                })
                .collect(),
        }
    }

    /// Target field for a source column, if the column is known.
    pub fn field_for(&self, column: &str) -> Option<LeadField> {
        self.mappings
            .iter()
            .find(|m| m.column == column)
            .map(|m| m.field)
    }

    /// Returns true if the column is part of the mapping.
    pub fn is_known(&self, column: &str) -> bool {
        self.field_for(column).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnMapping> {
        self.mappings.iter()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self::crm_lead()
    }
}

/// Column names that must appear in the header row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequiredColumnSet {
    columns: BTreeSet<String>,
}

impl RequiredColumnSet {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns
                .into_iter()
                .map(|c| c.into().trim().to_string())
                .collect(),
        }
    }

    /// Columns backing the per-row identity rule (first name or organization).
    pub fn identity() -> Self {
        Self::new(["First Name", "Organization"])
    }

    /// Every person and status column of the CRM lead layout.
    pub fn full_lead() -> Self {
        Self::new([
            "Salutation",
            "First Name",
            "Last Name",
            "Email",
            "Mobile No",
            "Gender",
            "Status",
            "Organization",
        ])
    }

    /// Required columns absent from `header`, sorted.
    pub fn missing_from<S: AsRef<str>>(&self, header: &[S]) -> Vec<String> {
        self.columns
            .iter()
            .filter(|required| !header.iter().any(|h| h.as_ref() == required.as_str()))
            .cloned()
            .collect()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.contains(column)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crm_lead_maps_every_field_once() {
        let spec = ColumnSpec::crm_lead();
        assert_eq!(spec.len(), LeadField::ALL.len());
        for field in LeadField::ALL {
            assert_eq!(spec.iter().filter(|m| m.field == field).count(), 1);
        }
        assert_eq!(spec.field_for("No. of Employees"), Some(LeadField::NoOfEmployees));
        assert!(!spec.is_known("Fax"));
    }

    #[test]
    fn new_rejects_duplicate_targets() {
        let result = ColumnSpec::new([
            ("Given Name", LeadField::FirstName),
            ("First", LeadField::FirstName),
        ]);
        assert!(matches!(
            result,
            Err(ProfileError::DuplicateField {
                field: LeadField::FirstName,
                ..
            })
        ));
    }

    #[test]
    fn new_trims_column_names() {
        let spec = ColumnSpec::new([("  Company ", LeadField::Organization)]).unwrap();
        assert_eq!(spec.field_for("Company"), Some(LeadField::Organization));
    }

    #[test]
    fn missing_columns_are_sorted() {
        let required = RequiredColumnSet::full_lead();
        let missing = required.missing_from(&["First Name", "Email", "Organization"]);
        assert_eq!(
            missing,
            vec!["Gender", "Last Name", "Mobile No", "Salutation", "Status"]
        );
        assert!(RequiredColumnSet::identity()
            .missing_from(&["Organization", "First Name"])
            .is_empty());
    }
}
