//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use crm_cli::pipeline::ColumnOverride;
use crm_import::{DEFAULT_BATCH_SIZE, DuplicatePolicy};
use crm_validate::DEFAULT_SAMPLE_SIZE;

#[derive(Parser)]
#[command(
    name = "crm-cli",
    version,
    about = "Map, validate and import organization/contact CSV files",
    long_about = "Map spreadsheet exports onto CRM organizations and contacts.\n\n\
                  Headers are matched to CRM fields by synonym and fuzzy matching,\n\
                  rows are validated and grouped by organization, then imported\n\
                  in batches into a JSON-backed store."
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

    /// Log output format.
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

    /// Allow organization and contact values in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show how the CSV headers map onto CRM fields.
    Map(MapArgs),

    /// Validate rows and show counts with sample valid/invalid rows.
    Preview(PreviewArgs),

    /// Import the CSV into a store file.
    Import(ImportArgs),

    /// Write the CSV template with sample rows.
    Template(TemplateArgs),
}

/// Input file and mapping adjustments shared by every command that reads a CSV.
#[derive(Args)]
pub struct MappingArgs {
    /// CSV file to read.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Apply overrides from a saved mapping profile.
    #[arg(long = "profile", value_name = "PATH")]
    pub profile: Option<PathBuf>,

    /// Override one column, e.g. `--map "Booth Visitor=contact_name"` or `--map Badge=skip`.
    #[arg(long = "map", value_name = "COLUMN=FIELD")]
    pub overrides: Vec<ColumnOverride>,

    /// Require the template's organization column to be present.
    #[arg(long = "strict-template")]
    pub strict_template: bool,

    /// Output format for results.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Args)]
pub struct MapArgs {
    #[command(flatten)]
    pub mapping: MappingArgs,

    /// Save the resulting overrides as a mapping profile.
    #[arg(long = "save-profile", value_name = "PATH")]
    pub save_profile: Option<PathBuf>,
}

#[derive(Args)]
pub struct ValidationArgs {
    /// Treat malformed emails as warnings instead of rejecting the row.
    #[arg(long = "lenient-email")]
    pub lenient_email: bool,

    /// Number of valid and invalid rows to show.
    #[arg(long = "sample", value_name = "N", default_value_t = DEFAULT_SAMPLE_SIZE)]
    pub sample: usize,
}

#[derive(Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub mapping: MappingArgs,

    #[command(flatten)]
    pub validation: ValidationArgs,
}

#[derive(Args)]
pub struct ImportArgs {
    #[command(flatten)]
    pub mapping: MappingArgs,

    #[command(flatten)]
    pub validation: ValidationArgs,

    /// JSON store file; created when missing.
    #[arg(long = "store", value_name = "PATH")]
    pub store: PathBuf,

    /// Signed-in user recorded as creator of imported records.
    #[arg(long = "actor", env = "CRM_ACTOR", value_name = "ID")]
    pub actor: Option<String>,

    /// Organizations per insert call.
    #[arg(long = "batch-size", value_name = "N", default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// How organizations that already exist are handled.
    #[arg(long = "duplicates", value_enum, default_value = "prefilter")]
    pub duplicates: DuplicatesArg,

    /// Validate and group without writing to the store.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct TemplateArgs {
    /// Output path (stdout when omitted).
    #[arg(value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DuplicatesArg {
    /// Look names up and skip existing ones.
    Prefilter,
    /// Let the store's unique constraint reject duplicates.
    Store,
}

impl From<DuplicatesArg> for DuplicatePolicy {
    fn from(value: DuplicatesArg) -> Self {
        match value {
            DuplicatesArg::Prefilter => DuplicatePolicy::PreFilter,
            DuplicatesArg::Store => DuplicatePolicy::StoreEnforced,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
