//! Operator-facing console lines.
//!
//! Stateless helpers: each call formats one prefixed, colored line from its
//! arguments. Errors and warnings go to stderr, everything else to stdout.

use colored::*;

/// Formats an error line: `ERROR: <message>`.
pub fn format_error(message: &str) -> String {
    format!("{} {}", "ERROR:".red().bold(), message)
}

/// Formats a warning line: `WARNING: <message>`.
pub fn format_warning(message: &str) -> String {
    format!("{} {}", "WARNING:".yellow().bold(), message)
}

/// Formats a notice line: `NOTICE: <message>`.
pub fn format_notice(message: &str) -> String {
    format!("{} {}", "NOTICE:".cyan().bold(), message)
}

/// Formats a success line: `OK: <message>`.
pub fn format_success(message: &str) -> String {
    format!("{} {}", "OK:".green().bold(), message)
}

pub fn print_error(message: &str) {
    eprintln!("{}", format_error(message));
}

pub fn print_warning(message: &str) {
    eprintln!("{}", format_warning(message));
}

pub fn print_notice(message: &str) {
    println!("{}", format_notice(message));
}

pub fn print_success(message: &str) {
    println!("{}", format_success(message));
}
