//! Error type definitions.
//!
//! This module defines every failure a run can end with, plus the
//! initialization errors raised before the pipeline starts.

use std::path::PathBuf;

use log::SetLoggerError;
use thiserror::Error;

use crate::paths::PathRole;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Everything that can stop a run.
///
/// All variants are fatal except [`ReportError::NoMatchingSegments`], which
/// ends the run early with nothing to do.
#[derive(Error, Debug)]
pub enum ReportError {
    /// A non-empty time bound matched none of the accepted formats.
    #[error(
        "invalid --{bound} value '{spec}': expected YYYY-MM-DD, \"YYYY-MM-DD HH:MM:SS\" or a 10-digit unix timestamp"
    )]
    InvalidTimeSpec { bound: &'static str, spec: String },

    /// The resolved window starts after it ends.
    #[error("invalid time window: start {start} is after end {end}")]
    InvalidRange { start: String, end: String },

    /// A directory resolved to the filesystem root.
    #[error("refusing to use the filesystem root as {role} directory ({path})")]
    RootPathRejected { role: PathRole, path: String },

    /// A directory is missing or lacks the required permission.
    #[error("{role} directory {path} is not usable by user '{user}': {reason}")]
    PathUnavailable {
        role: PathRole,
        path: String,
        user: String,
        reason: String,
    },

    /// The operation list contains an unrecognised name.
    #[error(
        "unknown SQL operation '{value}': expected a comma-separated list of all, update, insert, delete, drop, truncate"
    )]
    UnknownOperation { value: String },

    /// Reading, writing, creating or removing a file failed.
    #[error("failed to {action} {}: {source}", path.display())]
    IoFailure {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The decoder could not be started or exited non-zero with a message.
    #[error("binary log decoding failed ({status}): {message}")]
    DecodeFailure { status: String, message: String },

    /// No segment matched the prefix and window.
    #[error("no binary log segments named {prefix}.<digits> in {} were modified between {start} and {end}", dir.display())]
    NoMatchingSegments {
        dir: PathBuf,
        prefix: String,
        start: String,
        end: String,
    },

    /// The combined log could not be opened or read.
    #[error("cannot read {} as user '{user}': {source}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        user: String,
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReportError::InvalidTimeSpec { .. } => ErrorKind::InvalidTimeSpec,
            ReportError::InvalidRange { .. } => ErrorKind::InvalidRange,
            ReportError::RootPathRejected { .. } => ErrorKind::RootPathRejected,
            ReportError::PathUnavailable { .. } => ErrorKind::PathUnavailable,
            ReportError::UnknownOperation { .. } => ErrorKind::UnknownOperation,
            ReportError::IoFailure { .. } => ErrorKind::IoFailure,
            ReportError::DecodeFailure { .. } => ErrorKind::DecodeFailure,
            ReportError::NoMatchingSegments { .. } => ErrorKind::NoMatchingSegments,
            ReportError::SourceUnreadable { .. } => ErrorKind::SourceUnreadable,
        }
    }

    /// Whether the run must abort with a non-zero exit status.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ReportError::NoMatchingSegments { .. })
    }
}

/// Categories of [`ReportError`], used for log lines and summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    // Validation
    InvalidTimeSpec,
    InvalidRange,
    RootPathRejected,
    PathUnavailable,
    UnknownOperation,
    // Execution
    IoFailure,
    DecodeFailure,
    SourceUnreadable,
    // Early exit
    NoMatchingSegments,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidTimeSpec => "invalid time specification",
            ErrorKind::InvalidRange => "invalid time range",
            ErrorKind::RootPathRejected => "root path rejected",
            ErrorKind::PathUnavailable => "path unavailable",
            ErrorKind::UnknownOperation => "unknown operation",
            ErrorKind::IoFailure => "I/O failure",
            ErrorKind::DecodeFailure => "decode failure",
            ErrorKind::SourceUnreadable => "source unreadable",
            ErrorKind::NoMatchingSegments => "no matching segments",
        }
    }
}
