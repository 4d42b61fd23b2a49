//! Record stores: in memory and JSON Lines on disk.

use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crm_model::LeadRecord;

use crate::collab::RecordStore;
use crate::error::StoreError;

/// Keeps inserted records in memory. Rejects a repeated non-empty email.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: Vec<LeadRecord>,
    emails: HashSet<String>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[LeadRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for MemoryRecordStore {
    fn insert(&mut self, record_type: &str, record: &LeadRecord) -> Result<(), StoreError> {
        self.validate(record_type, record)?;
        let email = unclaimed_email(&self.emails, record)?;
        self.emails.extend(email);
        self.records.push(record.clone());
        Ok(())
    }
}

/// Appends one JSON object per record to a file.
///
/// Emails already present in the file count as taken, so re-running an
/// import against the same store reports duplicates instead of writing them
/// twice.
#[derive(Debug)]
pub struct JsonLinesStore {
    path: PathBuf,
    file: File,
    emails: HashSet<String>,
    written: usize,
}

#[derive(Serialize)]
struct StoredLead<'a> {
    record_type: &'a str,
    imported_at: String,
    #[serde(flatten)]
    record: &'a LeadRecord,
}

impl JsonLinesStore {
    /// Open or create the store file.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let emails = if path.exists() {
            existing_emails(path)?
        } else {
            HashSet::new()
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| write_error(path, source))?;

        tracing::debug!(path = %path.display(), known_emails = emails.len(), "opened lead store");
        Ok(Self {
            path: path.to_path_buf(),
            file,
            emails,
            written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records written by this handle.
    pub fn written(&self) -> usize {
        self.written
    }
}

impl RecordStore for JsonLinesStore {
    fn insert(&mut self, record_type: &str, record: &LeadRecord) -> Result<(), StoreError> {
        self.validate(record_type, record)?;

        let line = serde_json::to_string(&StoredLead {
            record_type,
            imported_at: chrono::Utc::now().to_rfc3339(),
            record,
        })?;

        let email = unclaimed_email(&self.emails, record)?;
        writeln!(self.file, "{line}")
            .and_then(|()| self.file.flush())
            .map_err(|source| write_error(&self.path, source))?;
        // Only a persisted record takes its email.
        self.emails.extend(email);
        self.written += 1;
        Ok(())
    }
}

/// The lowercased email key of `record`, or a duplicate error when it is taken.
fn unclaimed_email(
    emails: &HashSet<String>,
    record: &LeadRecord,
) -> Result<Option<String>, StoreError> {
    let email = record.payload().email.as_str();
    if email.is_empty() {
        return Ok(None);
    }
    let key = email.to_lowercase();
    if emails.contains(&key) {
        return Err(StoreError::Duplicate {
            field: "email",
            value: email.to_string(),
        });
    }
    Ok(Some(key))
}

fn existing_emails(path: &Path) -> Result<HashSet<String>, StoreError> {
    let file = File::open(path).map_err(|source| write_error(path, source))?;
    let mut emails = HashSet::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|source| write_error(path, source))?;
        if line.trim().is_empty() {
            continue;
        }
        let value: serde_json::Value =
            serde_json::from_str(&line).map_err(|e| StoreError::Corrupt {
                path: path.to_path_buf(),
                line: idx + 1,
                message: e.to_string(),
            })?;
        if let Some(email) = value.get("email").and_then(serde_json::Value::as_str)
            && !email.is_empty()
        {
            emails.insert(email.to_lowercase());
        }
    }
    Ok(emails)
}

fn write_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Write {
        path: path.to_path_buf(),
        source,
    }
}
