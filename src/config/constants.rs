//! Configuration constants.
//!
//! Defaults for every operator-facing option plus the fixed names and formats
//! of the files a run produces.

/// Directory searched for binary log segments when `--binary-logs-file-path` is empty.
pub const DEFAULT_SOURCE_DIR: &str = "/var/lib/mysql/";

/// Segment filename prefix used when `--binary-logs-file-name` is empty.
pub const DEFAULT_SEGMENT_PREFIX: &str = "mysql-bin";

/// Decoding utility invoked when `--decoder` is not given.
pub const DEFAULT_DECODER: &str = "mysqlbinlog";

/// Options passed to the decoder ahead of the segment paths.
///
/// Verbose row-level output with base64 row images decoded into pseudo-SQL,
/// and GTID events skipped so segments from different servers decode together.
pub const DECODER_OPTIONS: &[&str] = &[
    "--base64-output=decode-rows",
    "--verbose",
    "--verbose",
    "--skip-gtids",
];

/// Default operation list (`-s/--sql-operations`).
pub const DEFAULT_SQL_OPERATIONS: &str = "all";

// Output artifacts
/// Transient combined decoder output, removed after a successful run.
pub const RAW_LOG_FILE_NAME: &str = "mysql-raw.log";
pub const MANIFEST_FILE_SUFFIX: &str = "binary-logs-list.txt";
pub const REPORT_FILE_SUFFIX: &str = "binary-logs-report.txt";

// Time formats
/// Canonical display format for window bounds.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// Report layout
/// Marker the decoder puts in front of row-event pseudo statements.
pub const ROW_EVENT_MARKER: &str = "### ";
/// Rule printed under each report section title.
pub const SECTION_RULE: &str = "==============================";

/// Longest decoder error text carried into an error message, in characters.
pub const MAX_DECODER_MESSAGE_LENGTH: usize = 2000;
