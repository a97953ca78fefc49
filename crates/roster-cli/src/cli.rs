//! CLI argument definitions for the roster importer.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "roster",
    version,
    about = "Import athlete test results from CSV into a team roster",
    long_about = "Import athlete test results from CSV into a team roster.\n\n\
                  Maps spreadsheet columns to fields and metrics, matches rows to\n\
                  known athletes, and uploads the resulting records in batches."
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

    /// Allow athlete names and cell values in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Configuration file (default: ./roster.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Athlete store directory (overrides store_dir in the config).
    #[arg(long = "store", value_name = "DIR", global = true)]
    pub store: Option<PathBuf>,

    /// Organization to operate on (overrides organization in the config).
    #[arg(long = "org", value_name = "ID", global = true)]
    pub org: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import a CSV of test results.
    Import(ImportArgs),

    /// Show how a CSV's columns would be mapped.
    Map(MapArgs),

    /// List roster entries that likely describe the same athlete.
    Duplicates(OutputArgs),

    /// List or add athletes.
    #[command(subcommand)]
    Athletes(AthletesCommand),

    /// List or add metric definitions.
    #[command(subcommand)]
    Metrics(MetricsCommand),
}

#[derive(Args)]
pub struct MappingArgs {
    /// Path to the CSV file.
    #[arg(value_name = "CSV")]
    pub file: PathBuf,

    /// Override a column mapping: HEADER=field (field "skip" unmaps the column).
    #[arg(long = "map", value_name = "HEADER=FIELD")]
    pub overrides: Vec<String>,
}

#[derive(Args)]
pub struct ImportArgs {
    #[command(flatten)]
    pub mapping: MappingArgs,

    /// What to do with athletes not on the roster.
    #[arg(long = "on-missing", value_enum, default_value = "skip")]
    pub on_missing: OnMissingArg,

    /// Date for rows without one (YYYY-MM-DD).
    #[arg(long = "default-date", value_name = "DATE")]
    pub default_date: Option<NaiveDate>,

    /// Notes for rows without a notes cell.
    #[arg(long = "notes", value_name = "TEXT")]
    pub notes: Option<String>,

    /// Reconcile and report without creating athletes or writing records.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Records per upload batch.
    #[arg(long = "batch-size", value_name = "N")]
    pub batch_size: Option<usize>,

    /// Upload batches in flight at once.
    #[arg(long = "max-in-flight", value_name = "N")]
    pub max_in_flight: Option<usize>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct MapArgs {
    #[command(flatten)]
    pub mapping: MappingArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Clone, Copy)]
pub struct OutputArgs {
    /// Print machine-readable JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum AthletesCommand {
    /// List athletes on the roster.
    List(OutputArgs),
    /// Add an athlete to the roster.
    Add(AddAthleteArgs),
}

#[derive(Args)]
pub struct AddAthleteArgs {
    pub first_name: String,
    pub last_name: String,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub pin: Option<String>,
    /// Team id (repeatable).
    #[arg(long = "team", value_name = "ID")]
    pub teams: Vec<String>,
}

#[derive(Subcommand)]
pub enum MetricsCommand {
    /// List metric definitions.
    List(OutputArgs),
    /// Add or replace a metric definition.
    Add(AddMetricArgs),
}

#[derive(Args)]
pub struct AddMetricArgs {
    /// Stable metric id, e.g. 40yd.
    pub id: String,
    /// Display name; also matched against CSV headers.
    pub name: String,
    pub unit: String,
    #[arg(long = "lower-is-better")]
    pub lower_is_better: bool,
}

/// Handling of athletes missing from the roster.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnMissingArg {
    /// Add them to the roster and import their rows.
    Create,
    /// Leave their rows out and list them in the summary.
    Skip,
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
