//! Small helpers shared across the pipeline.
//!
//! This module provides:
//! - Sanitization of decoder diagnostics
//! - Lookup of the invoking user's name

pub mod sanitize;
mod user;

pub use sanitize::sanitize_decoder_stderr;
pub use user::current_username;
