//! Account prioritizer CLI.

use std::io::{self, IsTerminal};

use acct_cli::commands::{load_classifier_config, run_classify, run_score, run_weights};
use acct_cli::logging::{LogConfig, LogFormat, init_logging};
use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

mod cli;
mod summary;

use crate::cli::{ClassifyArgs, Cli, Command, LogFormatArg, LogLevelArg, ScoreArgs};
use crate::summary::{print_classify, print_score, print_weights};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Classify(args) => report_error(classify(&args)),
        Command::Score(args) => report_error(score(&args)),
        Command::Weights(args) => match run_weights(&args.weights) {
            Ok(report) => {
                print_weights(&report);
                if report.validation.valid { 0 } else { 1 }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

fn classify(args: &ClassifyArgs) -> Result<()> {
    let mut config = load_classifier_config(args.config.as_deref())?;
    if let Some(rows) = args.sample_rows {
        config = config.with_sample_rows(rows);
    }
    let report = run_classify(&args.file, &config)?;
    if args.json {
        let json = serde_json::to_string_pretty(&report).context("serialize report")?;
        println!("{json}");
    } else {
        print_classify(&report);
    }
    Ok(())
}

fn score(args: &ScoreArgs) -> Result<()> {
    let config = load_classifier_config(args.config.as_deref())?;
    let report = run_score(&args.file, &args.scenario, args.output.as_deref(), &config)?;
    print_score(&report);
    Ok(())
}

fn report_error(result: Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
