use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use crm_cli::pipeline::{ImportRequest, ImportRun, load_profile, run_import as run_pipeline};
use crm_import::render_outcome;

use crate::cli::{ColumnsArgs, ImportArgs, ReportFormatArg};
use crate::summary::{apply_table_style, print_summary};

pub fn run_import(args: &ImportArgs, log_data: bool) -> Result<ImportRun> {
    let request = ImportRequest {
        file: args.file.clone(),
        dry_run: args.dry_run,
        profile: args.profile.clone(),
        schema: args.schema.clone(),
        store: args.store.clone(),
        encoding: args.encoding.clone(),
        echo_rows: args.echo_rows,
        log_data,
        max_file_size: args.max_file_size,
    };
    run_pipeline(&request)
}

pub fn print_run(run: &ImportRun, format: ReportFormatArg) -> Result<()> {
    match format {
        ReportFormatArg::Text => println!("{}", render_outcome(&run.outcome)),
        ReportFormatArg::Table => print_summary(run),
        ReportFormatArg::Json => {
            let json = serde_json::to_string_pretty(run).context("serialize outcome")?;
            println!("{json}");
        }
    }
    Ok(())
}

pub fn run_columns(args: &ColumnsArgs) -> Result<()> {
    let profile = load_profile(args.profile.as_deref())?;
    println!("Record type: {}", profile.record_type);

    let mut table = Table::new();
    table.set_header(vec!["Column", "Field", "Required", "Vocabulary"]);
    apply_table_style(&mut table);
    for mapping in profile.columns.iter() {
        let required = profile.required.contains(&mapping.column);
        let vocabulary = profile.vocabulary_fields.contains(&mapping.field);
        table.add_row(vec![
            Cell::new(&mapping.column),
            Cell::new(mapping.field.as_str()),
            Cell::new(if required { "yes" } else { "-" }),
            Cell::new(if vocabulary { "yes" } else { "-" }),
        ]);
    }
    println!("{table}");
    Ok(())
}
