//! Operation frequency report.
//!
//! This module provides:
//! - [`OperationKind`] and the operator's [`OperationFilter`]
//! - The in-process line scan that groups and counts matching statements
//! - The report model and its text layout

mod builder;
mod operation;
mod types;

// Re-export public API
pub use builder::{build_report, classify_line, scan_operations};
pub use operation::{OperationFilter, OperationKind};
pub use types::{OperationReport, ReportRow, ReportSection};
