use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use crm_cli::pipeline::ImportRun;
use crm_import::{ImportOutcome, ImportResult, MAX_REPORTED_ERRORS, NO_ROWS_MESSAGE};

pub fn print_summary(run: &ImportRun) {
    println!("File: {}", run.file.display());
    println!("SHA-256: {}", run.sha256);
    if let Some(path) = &run.store {
        println!("Store: {}", path.display());
    }
    let result = match &run.outcome {
        ImportOutcome::NoRows => {
            println!("{NO_ROWS_MESSAGE}");
            return;
        }
        ImportOutcome::Completed(result) => result,
    };

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Mode"),
        header_cell("Encoding"),
        header_cell("Delimiter"),
        header_cell("Rows"),
        header_cell("Inserted"),
        header_cell("Errors"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 3..6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        mode_cell(result.dry_run),
        Cell::new(&result.encoding),
        Cell::new(delimiter_label(result.delimiter)),
        Cell::new(result.non_blank_rows),
        count_cell(result.inserted(), Color::Green),
        count_cell(result.error_count(), Color::Red),
    ]);
    println!("{table}");
    print_error_table(result);
}

fn print_error_table(result: &ImportResult) {
    if !result.has_errors() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Line"), header_cell("Message")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for error in result.errors.iter().take(MAX_REPORTED_ERRORS) {
        table.add_row(vec![Cell::new(error.line).fg(Color::Red), Cell::new(&error.message)]);
    }
    println!();
    println!("Errors (first {MAX_REPORTED_ERRORS}):");
    println!("{table}");
    let hidden = result.error_count().saturating_sub(MAX_REPORTED_ERRORS);
    if hidden > 0 {
        println!("... and {hidden} more");
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
    if table.column_count() >= 6 {
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::UpperBoundary(Width::Fixed(14)),
            ColumnConstraint::LowerBoundary(Width::Fixed(9)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn mode_cell(dry_run: bool) -> Cell {
    if dry_run {
        Cell::new("dry run").fg(Color::Yellow)
    } else {
        Cell::new("commit")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    }
}

fn delimiter_label(delimiter: char) -> String {
    match delimiter {
        '\t' => "tab".to_string(),
        ' ' => "space".to_string(),
        other => other.to_string(),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
