//! CLI argument definitions for the lead importer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use crm_ingest::MAX_CSV_FILE_SIZE;

#[derive(Parser)]
#[command(
    name = "crm-import",
    version,
    about = "Import CRM leads from CSV files",
    long_about = "Import CRM leads from CSV files.\n\n\
                  Detects the file encoding and delimiter, checks the header against\n\
                  an import profile, validates each row and reports per-row errors."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow cell values in debug logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import leads from a CSV file.
    Import(ImportArgs),

    /// Show the column mapping of an import profile.
    Columns(ColumnsArgs),
}

#[derive(Parser)]
pub struct ImportArgs {
    /// CSV file to import.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Validate every row without storing anything.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Import profile (TOML). Defaults to the built-in CRM Lead profile.
    #[arg(long = "profile", value_name = "PATH")]
    pub profile: Option<PathBuf>,

    /// Schema file with select options (TOML). Defaults to the built-in CRM Lead schema.
    #[arg(long = "schema", value_name = "PATH")]
    pub schema: Option<PathBuf>,

    /// Append committed leads to this JSON Lines file.
    #[arg(long = "store", value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Decode the file with this encoding label instead of detecting it.
    #[arg(long = "encoding", value_name = "LABEL")]
    pub encoding: Option<String>,

    /// Include every parsed row in the report.
    #[arg(long = "echo-rows")]
    pub echo_rows: bool,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ReportFormatArg,

    /// Refuse files larger than this many bytes.
    #[arg(long = "max-file-size", value_name = "BYTES", default_value_t = MAX_CSV_FILE_SIZE)]
    pub max_file_size: u64,
}

#[derive(Parser)]
pub struct ColumnsArgs {
    /// Import profile (TOML). Defaults to the built-in CRM Lead profile.
    #[arg(long = "profile", value_name = "PATH")]
    pub profile: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormatArg {
    /// The plain-text report.
    Text,
    /// Summary and error tables.
    Table,
    /// The outcome as JSON.
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
