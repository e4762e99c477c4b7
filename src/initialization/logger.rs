//! Logger initialization.
//!
//! Diagnostics go through the `log` facade to `env_logger` on stderr, either as
//! colored plain lines or as one JSON object per line.

use std::io::Write;

use chrono::Local;
use colored::*;
use log::{Level, LevelFilter};

use crate::config::{LogFormat, DATETIME_FORMAT};
use crate::error_handling::InitializationError;

/// Initializes the logger with the specified level and format.
///
/// `RUST_LOG` is read first; `level` then overrides it for this crate, so
/// `--log-level` always wins for pipeline messages.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Use RUST_LOG for quick debugging (no CLI args needed)
/// RUST_LOG=debug binlog_report -f 2024-05-01
///
/// # Override with CLI args (takes precedence)
/// RUST_LOG=debug binlog_report -f 2024-05-01 --log-level info
///
/// # JSON lines for log shippers
/// binlog_report --log-format json
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    builder.filter_module("binlog_report", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{}",
                    json_line(
                        Local::now().timestamp_millis(),
                        record.level(),
                        record.target(),
                        &record.args().to_string()
                    )
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{}",
                    plain_line(
                        &Local::now().format(DATETIME_FORMAT).to_string(),
                        record.level(),
                        record.target(),
                        &record.args().to_string()
                    )
                )
            });
        }
    }

    builder.try_init().map_err(InitializationError::from)?;
    Ok(())
}

/// `<time> <emoji> [LEVEL] <target> <message>`, level and target colored.
fn plain_line(timestamp: &str, level: Level, target: &str, message: &str) -> String {
    let (emoji, colored_level) = match level {
        Level::Error => ("❌", level.as_str().red()),
        Level::Warn => ("⚠️", level.as_str().yellow()),
        Level::Info => ("✔️", level.as_str().green()),
        Level::Debug => ("🔍", level.as_str().blue()),
        Level::Trace => ("🔬", level.as_str().purple()),
    };
    format!(
        "{} {} [{}] {} {}",
        timestamp.dimmed(),
        emoji,
        colored_level,
        target.cyan(),
        message
    )
}

/// `{"ts":<millis>,"level":"..","target":"..","msg":".."}` with escaped strings.
fn json_line(timestamp_millis: i64, level: Level, target: &str, message: &str) -> String {
    serde_json::json!({
        "ts": timestamp_millis,
        "level": level.as_str(),
        "target": target,
        "msg": message,
    })
    .to_string()
}
