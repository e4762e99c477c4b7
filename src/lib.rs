//! binlog_report library: binary log change auditing
//!
//! This library selects MySQL binary log segments modified within a time
//! window, decodes them with the external `mysqlbinlog` utility, and counts
//! the UPDATE, INSERT, DELETE, TRUNCATE and DROP statements they contain.
//!
//! # Example
//!
//! ```no_run
//! use binlog_report::{run_pipeline, Config, RunOutcome};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     dt_from: "2024-05-01".to_string(),
//!     dt_to: "2024-05-01".to_string(),
//!     binary_logs_file_path: "/var/lib/mysql".to_string(),
//!     sql_operations: "update,delete".to_string(),
//!     ..Default::default()
//! };
//!
//! if let RunOutcome::Completed(report) = run_pipeline(&config)? {
//!     println!("{} segments, report in {}",
//!              report.segment_count, report.report_path.display());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! The decoding utility must be on `PATH` (or given through
//! [`Config::decoder`]) and the invoking user needs read access to the
//! segments.

pub mod app;
pub mod config;
mod decode;
mod error_handling;
pub mod initialization;
mod paths;
pub mod report;
mod run;
pub mod segments;
mod utils;
mod window;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, Opt, WorkingConfig};
pub use decode::{DecodeOutcome, LogDecoder};
pub use error_handling::{ErrorKind, ReportError};
pub use paths::{resolve_output_dir, resolve_source_dir, PathRole};
pub use report::{build_report, OperationFilter, OperationKind, OperationReport};
pub use run::{run_pipeline, run_with, OutputFiles, RunOutcome, RunReport, RunStage};
pub use segments::{locate_segments, write_segment_list};
pub use utils::current_username;
pub use window::{Bound, TimeWindow};
