//! Error handling.
//!
//! This module provides:
//! - The [`ReportError`] taxonomy every pipeline stage reports through
//! - [`ErrorKind`] categories for logging and summaries
//! - Initialization errors raised before the pipeline starts
//!
//! Errors are never retried: each one stems from configuration or the
//! environment, so the run stops at the first fatal error.

mod types;

// Re-export public API
pub use types::{ErrorKind, InitializationError, ReportError};
