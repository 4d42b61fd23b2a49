//! Plain-text import report.

use crate::result::{ImportOutcome, ImportResult};

/// Error lines listed in a report. The error count is always exact.
pub const MAX_REPORTED_ERRORS: usize = 100;

/// Report text for a file without data rows.
pub const NO_ROWS_MESSAGE: &str = "No rows found (need header + at least one data row).";

pub fn render_report(result: &ImportResult) -> String {
    let mut lines = vec![
        format!("Dry run: {}", result.dry_run),
        format!("Inserted (new records): {}", result.inserted()),
        format!("Errors: {}", result.error_count()),
    ];
    if let Some(rows) = &result.rows {
        lines.push(format!("Rows: {rows:?}"));
    }
    if result.has_errors() {
        lines.push(format!("\nDetails (first {MAX_REPORTED_ERRORS}):"));
        lines.extend(
            result
                .errors
                .iter()
                .take(MAX_REPORTED_ERRORS)
                .map(ToString::to_string),
        );
    }
    lines.join("\n")
}

pub fn render_outcome(outcome: &ImportOutcome) -> String {
    match outcome {
        ImportOutcome::NoRows => NO_ROWS_MESSAGE.to_string(),
        ImportOutcome::Completed(result) => render_report(result),
    }
}
