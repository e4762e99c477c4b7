//! Main application modules.
//!
//! This module provides the console formatting helpers and the end-of-run
//! summary used by the binary.

pub mod console;
pub mod statistics;

// Re-export public API
pub use console::{print_error, print_notice, print_success, print_warning};
pub use statistics::print_run_summary;
