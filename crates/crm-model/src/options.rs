//! Allowed values for select (fixed vocabulary) fields.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Allowed values per select field, keyed by stored field name.
///
/// Fetched once per import run and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectFieldOptions {
    fields: BTreeMap<String, BTreeSet<String>>,
}

impl SelectFieldOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the allowed values of a field.
    pub fn insert<I, S>(&mut self, field: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields
            .insert(field.into(), values.into_iter().map(Into::into).collect());
    }

    #[must_use]
    pub fn with_field<I, S>(mut self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(field, values);
        self
    }

    /// Allowed values for a field, or `None` if the field is not a select field.
    pub fn allowed(&self, field: &str) -> Option<&BTreeSet<String>> {
        self.fields.get(field)
    }

    /// Names of all select fields.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Parse newline-separated option text, dropping blank entries.
pub fn parse_select_options(text: &str) -> BTreeSet<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
