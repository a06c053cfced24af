//! CLI argument definitions for the account prioritizer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "acct-prioritizer",
    version,
    about = "Account prioritization - detect account columns and score accounts",
    long_about = "Detect the identifier and name columns of an account list, suggest\n\
                  field categories, and score accounts against 3-5 criteria.\n\n\
                  Scores are exported as a delimited file with one row per account."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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

    /// Include account values (ids, names, cells) in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Suggest identifier, name and category columns for an account list.
    Classify(ClassifyArgs),

    /// Score accounts against the criteria of a scenario file.
    Score(ScoreArgs),

    /// Check that category weights sum to 100%.
    Weights(WeightsArgs),
}

#[derive(Parser)]
pub struct ClassifyArgs {
    /// Account list (CSV).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Number of rows sampled for detection (default: 50).
    #[arg(long = "sample-rows", value_name = "N")]
    pub sample_rows: Option<usize>,

    /// Classifier settings (JSON).
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the report as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct ScoreArgs {
    /// Account list (CSV).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Scenario with criteria, column overrides and account levels (JSON).
    #[arg(long = "scenario", value_name = "FILE")]
    pub scenario: PathBuf,

    /// Export path (default: <FILE stem>-scores.csv next to FILE).
    #[arg(long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Classifier settings used when columns are detected (JSON).
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Parser)]
pub struct WeightsArgs {
    /// Category weights, e.g. firmographic=40 engagement=35 features=25.
    #[arg(value_name = "CATEGORY=PERCENT", required = true)]
    pub weights: Vec<String>,
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
