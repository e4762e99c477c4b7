//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (defaults, output file names, formats)
//! - CLI option types and parsing
//! - Validation of raw options into an immutable [`WorkingConfig`]

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel, Opt, WorkingConfig};
