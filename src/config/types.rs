//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration, and the validation step that turns raw operator input
//! into the [`WorkingConfig`] the pipeline runs against.

use std::path::PathBuf;

use chrono::{DateTime, Local};
use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_DECODER, DEFAULT_SEGMENT_PREFIX, DEFAULT_SQL_OPERATIONS,
};
use crate::error_handling::ReportError;
use crate::paths::{resolve_output_dir, resolve_source_dir};
use crate::report::OperationFilter;
use crate::window::TimeWindow;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Command-line options.
///
/// Every value is kept as the operator typed it; empty strings mean "use the
/// default" and are resolved by [`Config::validate`].
///
/// # Examples
///
/// ```bash
/// # Today's changes in the default data directory
/// binlog_report
///
/// # One day of UPDATE and DELETE statements from a custom location
/// binlog_report -f 2024-05-01 -t 2024-05-01 -p /data/mysql -s update,delete
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "binlog_report",
    version,
    about = "Counts the UPDATE/INSERT/DELETE/TRUNCATE/DROP statements recorded in MySQL binary logs over a time window."
)]
pub struct Opt {
    /// Window start: YYYY-MM-DD, "YYYY-MM-DD HH:MM:SS" or a 10-digit unix timestamp
    /// (default: today 00:00:00)
    #[arg(short = 'f', long = "dt-from", default_value = "")]
    pub dt_from: String,

    /// Window end: YYYY-MM-DD, "YYYY-MM-DD HH:MM:SS" or a 10-digit unix timestamp
    /// (default: now)
    #[arg(short = 't', long = "dt-to", default_value = "")]
    pub dt_to: String,

    /// Directory holding the binary log segments (default: /var/lib/mysql/)
    #[arg(short = 'p', long = "binary-logs-file-path", default_value = "")]
    pub binary_logs_file_path: String,

    /// Segment filename prefix, matched as <prefix>.<digits>
    #[arg(short = 'n', long = "binary-logs-file-name", default_value = DEFAULT_SEGMENT_PREFIX)]
    pub binary_logs_file_name: String,

    /// Directory the manifest and report are written to (default: current directory)
    #[arg(short = 'o', long = "output-path", default_value = "")]
    pub output_path: String,

    /// Comma-separated list of: all, update, insert, delete, drop, truncate
    #[arg(short = 's', long = "sql-operations", default_value = DEFAULT_SQL_OPERATIONS)]
    pub sql_operations: String,

    /// Binary log decoding utility
    #[arg(long, default_value = DEFAULT_DECODER)]
    pub decoder: String,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

/// Library configuration (no CLI dependencies).
///
/// Raw, unvalidated run parameters. Build one programmatically or from [`Opt`],
/// then call [`Config::validate`].
///
/// # Examples
///
/// ```no_run
/// use binlog_report::Config;
///
/// let config = Config {
///     dt_from: "2024-05-01".to_string(),
///     sql_operations: "update,insert".to_string(),
///     ..Default::default()
/// };
/// let working = config.validate().expect("invalid configuration");
/// println!("{}", working.window);
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Window start specification
    pub dt_from: String,

    /// Window end specification
    pub dt_to: String,

    /// Segment source directory
    pub binary_logs_file_path: String,

    /// Segment filename prefix
    pub binary_logs_file_name: String,

    /// Output directory
    pub output_path: String,

    /// Comma-separated operation list
    pub sql_operations: String,

    /// Decoding utility
    pub decoder: String,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dt_from: String::new(),
            dt_to: String::new(),
            binary_logs_file_path: String::new(),
            binary_logs_file_name: DEFAULT_SEGMENT_PREFIX.to_string(),
            output_path: String::new(),
            sql_operations: DEFAULT_SQL_OPERATIONS.to_string(),
            decoder: DEFAULT_DECODER.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Self {
            dt_from: opt.dt_from,
            dt_to: opt.dt_to,
            binary_logs_file_path: opt.binary_logs_file_path,
            binary_logs_file_name: opt.binary_logs_file_name,
            output_path: opt.output_path,
            sql_operations: opt.sql_operations,
            decoder: opt.decoder,
            log_level: opt.log_level,
            log_format: opt.log_format,
        }
    }
}

impl Config {
    /// Validates the raw options against the current local time.
    pub fn validate(&self) -> Result<WorkingConfig, ReportError> {
        self.validate_at(Local::now())
    }

    /// Validates the raw options, resolving time defaults against `now`.
    ///
    /// Checks run in order: operation list, time window, source directory,
    /// output directory. Nothing on disk is created or modified.
    ///
    /// # Errors
    ///
    /// Returns the first failing check as a [`ReportError`].
    pub fn validate_at(&self, now: DateTime<Local>) -> Result<WorkingConfig, ReportError> {
        let operations = self.sql_operations.parse::<OperationFilter>()?;
        let window = TimeWindow::resolve_at(&self.dt_from, &self.dt_to, now)?;
        let source_dir = resolve_source_dir(&self.binary_logs_file_path)?;
        let output_dir = resolve_output_dir(&self.output_path)?;

        let segment_prefix = match self.binary_logs_file_name.trim() {
            "" => DEFAULT_SEGMENT_PREFIX.to_string(),
            prefix => prefix.to_string(),
        };
        let decoder = match self.decoder.trim() {
            "" => DEFAULT_DECODER.to_string(),
            decoder => decoder.to_string(),
        };

        Ok(WorkingConfig {
            window,
            source_dir,
            segment_prefix,
            output_dir,
            operations,
            decoder,
        })
    }
}

/// Validated, immutable run configuration.
///
/// Both directories exist, are accessible (read for the source, write for the
/// output) and are not the filesystem root. Paths end with a separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingConfig {
    /// Inclusive time window segments must have been modified in
    pub window: TimeWindow,
    /// Directory walked for segments
    pub source_dir: PathBuf,
    /// Segment filename prefix (matched literally)
    pub segment_prefix: String,
    /// Directory receiving the manifest, raw log and report
    pub output_dir: PathBuf,
    /// Operation kinds included in the report
    pub operations: OperationFilter,
    /// Decoding utility
    pub decoder: String,
}
