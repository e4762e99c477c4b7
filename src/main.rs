//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `binlog_report` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output and exit codes
//!
//! All core functionality is implemented in the library crate.

use std::process;

use anyhow::{Context, Result};
use clap::error::ErrorKind as ClapErrorKind;
use clap::Parser;

use binlog_report::app::{print_error, print_notice, print_run_summary};
use binlog_report::initialization::init_logger_with;
use binlog_report::{run_pipeline, Config, Opt, RunOutcome};

fn main() {
    let opt = match Opt::try_parse() {
        Ok(opt) => opt,
        Err(e) => match e.kind() {
            // Help and version print to stdout and exit 0.
            ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                process::exit(1);
            }
        },
    };

    if let Err(e) = run(opt) {
        print_error(&format!("binlog_report error: {e:#}"));
        process::exit(1);
    }
}

fn run(opt: Opt) -> Result<()> {
    let config = Config::from(opt);
    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    match run_pipeline(&config)? {
        RunOutcome::Completed(report) => print_run_summary(&report),
        RunOutcome::NoMatchingSegments { message } => {
            print_notice(&format!("{message}; nothing to report"));
        }
    }
    Ok(())
}
