//! End-to-end import runs against the in-memory store.

use std::cell::RefCell;

use crm_import::{
    CollectingSink, ImportError, ImportOutcome, ImportResponse, ImportResult, Importer,
    MemoryRecordStore, NO_ROWS_MESSAGE, RecordStore, StaticSchemaProvider, StoreError,
    render_outcome, render_report,
};
use crm_model::{ImportProfile, LeadRecord, RequiredColumnSet};

/// Store that remembers every record it was asked to validate or insert.
#[derive(Default)]
struct RecordingStore {
    validated: RefCell<Vec<LeadRecord>>,
    inserted: Vec<LeadRecord>,
}

impl RecordStore for RecordingStore {
    fn validate(&self, _record_type: &str, record: &LeadRecord) -> Result<(), StoreError> {
        record.validate()?;
        self.validated.borrow_mut().push(record.clone());
        Ok(())
    }

    fn insert(&mut self, record_type: &str, record: &LeadRecord) -> Result<(), StoreError> {
        self.validate(record_type, record)?;
        self.inserted.push(record.clone());
        Ok(())
    }
}

fn run(text: &str, dry_run: bool) -> (ImportResult, MemoryRecordStore) {
    let profile = ImportProfile::crm_lead();
    let schema = StaticSchemaProvider::crm_lead();
    let mut store = MemoryRecordStore::new();
    let outcome = Importer::new(&profile, &schema, &mut store)
        .import_text(text, dry_run)
        .expect("import");
    match outcome {
        ImportOutcome::Completed(result) => (result, store),
        ImportOutcome::NoRows => panic!("expected data rows"),
    }
}

const MIXED: &str = "\
First Name,Last Name,Organization,Status
Ada,Lovelace,Analytical Engines,New
,Smith,,New
Grace,Hopper,Navy,Hot
Too,Few
,,,
";

#[test]
fn header_only_file_reports_no_rows() {
    let profile = ImportProfile::crm_lead();
    let schema = StaticSchemaProvider::crm_lead();
    let mut store = MemoryRecordStore::new();
    let mut importer = Importer::new(&profile, &schema, &mut store);

    for text in ["First Name,Organization\n", "First Name,Organization\n\n\n", ""] {
        let outcome = importer.import_text(text, false).expect("import");
        assert_eq!(outcome, ImportOutcome::NoRows);
        assert_eq!(render_outcome(&outcome), NO_ROWS_MESSAGE);
    }
}

#[test]
fn no_rows_is_decided_before_header_checks() {
    let profile = ImportProfile::crm_lead();
    let schema = StaticSchemaProvider::crm_lead();
    let mut store = MemoryRecordStore::new();
    let outcome = Importer::new(&profile, &schema, &mut store)
        .import_text("Fax\n", false)
        .expect("import");
    assert_eq!(outcome, ImportOutcome::NoRows);
}

#[test]
fn wrong_cell_count_is_one_error() {
    let (result, store) = run(
        "First Name,Organization\nAda\nAda,Engines,extra\n",
        false,
    );
    assert_eq!(result.created, 0);
    assert!(store.is_empty());
    let messages: Vec<String> = result.errors.iter().map(ToString::to_string).collect();
    assert_eq!(messages, vec![
        "Line 2: Row has 1 columns, but header expects 2 columns.",
        "Line 3: Row has 3 columns, but header expects 2 columns.",
    ]);
}

#[test]
fn blank_rows_are_skipped_silently() {
    for dry_run in [true, false] {
        let (result, _) = run("First Name,Organization\n,\n  ,\t\nAda,Engines\n", dry_run);
        assert!(result.errors.is_empty());
        assert_eq!(result.non_blank_rows, 1);
        assert_eq!(result.inserted(), 1);
    }
}

#[test]
fn dry_run_matches_commit_on_valid_file() {
    let text = "\
Salutation,First Name,Last Name,Organization,Status,Email
Dr.,Ada,Lovelace,Analytical Engines,New,ada@example.com
,,,Globex,Qualified,
Ms.,Grace,Hopper,,Contacted,grace@example.com
";
    let (dry, dry_store) = run(text, true);
    let (commit, commit_store) = run(text, false);

    assert_eq!(dry.inserted(), 3);
    assert_eq!(commit.inserted(), 3);
    assert_eq!(dry.errors, commit.errors);
    assert!(dry_store.is_empty());
    assert_eq!(commit_store.len(), 3);
    assert_eq!(commit_store.records()[0].lead_name(), "Dr. Ada Lovelace");
    assert_eq!(commit_store.records()[1].lead_name(), "");
}

#[test]
fn missing_identity_cites_line() {
    let (result, store) = run("First Name,Last Name,Organization\nAda,,\n,Smith,\n", false);
    assert_eq!(result.created, 1);
    assert_eq!(store.len(), 1);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].line, 3);
    assert_eq!(result.errors[0].message, "missing first_name/organization");
}

#[test]
fn vocabulary_violation_names_value_and_allowed_set() {
    let (result, _) = run(
        "First Name,Organization,Status\nAda,Engines,Hot\nGrace,Navy,Qualified\nLinus,Kernel,\n",
        false,
    );
    assert_eq!(result.created, 2);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(
        result.errors[0].to_string(),
        "Line 2: invalid value 'Hot' for status. \
         Allowed: Contacted, Junk, New, Nurture, Qualified, Unqualified"
    );
}

#[test]
fn round_trip_lead_name() {
    let profile = ImportProfile::crm_lead();
    let schema = StaticSchemaProvider::crm_lead();
    let mut store = RecordingStore::default();
    let outcome = Importer::new(&profile, &schema, &mut store)
        .import_text(
            "First Name,Last Name,Organization\nAda,Lovelace,Analytical Engines\n",
            true,
        )
        .expect("import");

    let result = outcome.result().expect("completed");
    assert_eq!(result.inserted(), 1);
    assert!(result.errors.is_empty());
    assert!(store.inserted.is_empty());
    let validated = store.validated.borrow();
    assert_eq!(validated.len(), 1);
    assert_eq!(validated[0].lead_name(), "Ada Lovelace");
}

#[test]
fn quoted_cells_after_spaced_commas() {
    let (result, store) = run(
        "\"First Name\", \"Organization\"\n\"Ada\", \"Engines, Ltd\"\n",
        false,
    );
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    assert_eq!(result.created, 1);
    let lead = store.records()[0].payload();
    assert_eq!(lead.first_name, "Ada");
    assert_eq!(lead.organization, "Engines, Ltd");
}

#[test]
fn missing_required_column_aborts() {
    let profile = ImportProfile::crm_lead().with_required(RequiredColumnSet::full_lead());
    let schema = StaticSchemaProvider::crm_lead();
    let mut store = RecordingStore::default();
    let err = Importer::new(&profile, &schema, &mut store)
        .import_text("First Name,Last Name,Organization\nAda,Lovelace,Engines\n", false)
        .unwrap_err();

    assert!(matches!(err, ImportError::Header(_)));
    assert_eq!(
        err.to_string(),
        "Missing required column(s): Email, Gender, Mobile No, Salutation, Status"
    );
    assert!(store.validated.borrow().is_empty());
    assert!(store.inserted.is_empty());
}

#[test]
fn undecodable_bytes_still_import() {
    let profile = ImportProfile::crm_lead();
    let schema = StaticSchemaProvider::crm_lead();
    let mut store = MemoryRecordStore::new();
    let bytes = b"First Name;Organization\nRen\xE9;Caf\xE9 \x81 Co\n";

    let outcome = Importer::new(&profile, &schema, &mut store)
        .import_bytes(bytes, false)
        .expect("import");
    let result = outcome.result().expect("completed");
    assert_eq!(result.created, 1);
    assert_eq!(result.delimiter, ';');
    assert_eq!(store.records()[0].payload().first_name, "René");
}

#[test]
fn forced_encoding() {
    let profile = ImportProfile::crm_lead();
    let schema = StaticSchemaProvider::crm_lead();
    let mut store = MemoryRecordStore::new();
    let outcome = Importer::new(&profile, &schema, &mut store)
        .with_encoding(Some("latin1".to_string()))
        .import_bytes(b"First Name,Organization\nJos\xE9,Acme\n", false)
        .expect("import");
    assert_eq!(outcome.result().expect("completed").encoding, "windows-1252");
    assert_eq!(store.records()[0].payload().first_name, "José");
}

#[test]
fn store_failure_keeps_earlier_rows() {
    let (result, store) = run(
        "\
First Name,Organization,Email
Ada,Engines,ada@example.com
Grace,Navy,ADA@example.com
Linus,Kernel,
",
        false,
    );
    assert_eq!(result.created, 2);
    assert_eq!(store.len(), 2);
    assert_eq!(
        result.errors[0].to_string(),
        "Line 3: Duplicate email: ADA@example.com already exists"
    );
}

#[test]
fn record_rules_run_in_dry_run() {
    let (result, _) = run(
        "First Name,Organization,Email,Annual Revenue\nAda,Engines,ada,\nGrace,Navy,,-3\n",
        true,
    );
    let messages: Vec<String> = result.errors.iter().map(ToString::to_string).collect();
    assert_eq!(messages, vec![
        "Line 2: ada is not a valid Email Address",
        "Line 3: Annual Revenue must be a non-negative number, got '-3'",
    ]);
    assert_eq!(result.inserted(), 0);
}

#[test]
fn report_lists_at_most_one_hundred_errors() {
    let mut text = String::from("First Name,Organization\n");
    for _ in 0..150 {
        text.push_str(",,\n");
    }
    let (result, _) = run(&text, false);
    assert_eq!(result.errors.len(), 150);

    let report = render_report(&result);
    assert!(report.contains("Errors: 150"));
    assert_eq!(report.lines().filter(|l| l.starts_with("Line ")).count(), 100);
}

#[test]
fn mixed_file_commit_report() {
    let (result, _) = run(MIXED, false);
    insta::assert_snapshot!(render_report(&result), @r"
    Dry run: false
    Inserted (new records): 1
    Errors: 3

    Details (first 100):
    Line 3: missing first_name/organization
    Line 4: invalid value 'Hot' for status. Allowed: Contacted, Junk, New, Nurture, Qualified, Unqualified
    Line 5: Row has 2 columns, but header expects 4 columns.
    ");
}

#[test]
fn mixed_file_dry_run_report() {
    let (result, _) = run(MIXED, true);
    insta::assert_snapshot!(render_report(&result), @r"
    Dry run: true
    Inserted (new records): 1
    Errors: 3

    Details (first 100):
    Line 3: missing first_name/organization
    Line 4: invalid value 'Hot' for status. Allowed: Contacted, Junk, New, Nurture, Qualified, Unqualified
    Line 5: Row has 2 columns, but header expects 4 columns.
    ");
}

#[test]
fn row_echo_in_report() {
    let profile = ImportProfile::crm_lead();
    let schema = StaticSchemaProvider::crm_lead();
    let mut store = MemoryRecordStore::new();
    let outcome = Importer::new(&profile, &schema, &mut store)
        .with_row_echo(true)
        .import_text("First Name,Organization\nAda,Engines\n", true)
        .expect("import");
    insta::assert_snapshot!(render_outcome(&outcome), @r#"
    Dry run: true
    Inserted (new records): 1
    Errors: 0
    Rows: [["First Name", "Organization"], ["Ada", "Engines"]]
    "#);
}

#[test]
fn upload_without_file_fails_at_transport() {
    let profile = ImportProfile::crm_lead();
    let schema = StaticSchemaProvider::crm_lead();
    let mut store = MemoryRecordStore::new();
    let mut importer = Importer::new(&profile, &schema, &mut store);

    assert_eq!(importer.import_upload(None, false), ImportResponse::Failure {
        exc: "File not found in request".to_string()
    });

    let response = importer.import_upload(Some(b"First Name\nAda\n"), false);
    assert_eq!(response, ImportResponse::Failure {
        exc: "Missing required column(s): Organization".to_string()
    });

    let response = importer.import_upload(Some(b"First Name,Organization\nAda,Engines\n"), true);
    assert!(!response.is_failure());
}

#[test]
fn unknown_columns_do_not_fail_the_run() {
    let profile = ImportProfile::crm_lead();
    let schema = StaticSchemaProvider::crm_lead();
    let sink = CollectingSink::new();
    let mut store = MemoryRecordStore::new();
    let outcome = Importer::new(&profile, &schema, &mut store)
        .with_diagnostics(&sink)
        .import_text("Fax,First Name,Organization\n123,Ada,Engines\n", false)
        .expect("import");

    assert_eq!(outcome.result().expect("completed").created, 1);
    assert_eq!(sink.entries()[0].body, "Fax");
}
