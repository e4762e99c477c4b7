//! Invocation of the external binary log decoder.
//!
//! The decoder runs once per pipeline with every selected segment as a
//! positional argument. Its standard output becomes the combined log and its
//! standard error is captured to tell real failures from a known quirk: the
//! utility sometimes exits non-zero without printing anything, and that case
//! is reported as a warning rather than aborting the run.

use std::ffi::OsString;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::{debug, info, warn};

use crate::config::{DECODER_OPTIONS, DEFAULT_DECODER};
use crate::error_handling::ReportError;
use crate::utils::sanitize_decoder_stderr;

/// How a decoder run ended, when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// Exit status zero.
    Clean,
    /// Non-zero exit with nothing on stderr; the combined log is used as is.
    CompletedWithWarning { status: String },
}

impl DecodeOutcome {
    pub fn is_warning(&self) -> bool {
        matches!(self, DecodeOutcome::CompletedWithWarning { .. })
    }
}

/// The decoding utility and the options placed before the segment paths.
#[derive(Debug, Clone)]
pub struct LogDecoder {
    program: OsString,
    options: Vec<OsString>,
}

impl Default for LogDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_DECODER)
    }
}

impl LogDecoder {
    /// Decoder with the standard row-decoding option set.
    pub fn new(program: impl Into<OsString>) -> Self {
        Self::with_options(program, DECODER_OPTIONS.iter().copied())
    }

    /// Decoder with a custom option list.
    pub fn with_options<I, S>(program: impl Into<OsString>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            program: program.into(),
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    /// Human-readable command line, for logging.
    pub fn command_line(&self, segments: &[PathBuf]) -> String {
        std::iter::once(self.program.to_string_lossy())
            .chain(self.options.iter().map(|o| o.to_string_lossy()))
            .chain(segments.iter().map(|s| s.as_os_str().to_string_lossy()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Decodes `segments`, in order, into `destination` (truncated first).
    ///
    /// Blocks until the decoder exits.
    ///
    /// # Errors
    ///
    /// - [`ReportError::IoFailure`] if `destination` cannot be opened for writing
    /// - [`ReportError::DecodeFailure`] if the decoder cannot be started, or exits
    ///   non-zero with a message on stderr
    pub fn decode(
        &self,
        segments: &[PathBuf],
        destination: &Path,
    ) -> Result<DecodeOutcome, ReportError> {
        let sink = File::create(destination).map_err(|source| ReportError::IoFailure {
            action: "open decoder output",
            path: destination.to_path_buf(),
            source,
        })?;

        info!(
            "Decoding {} segments into {}",
            segments.len(),
            destination.display()
        );
        debug!("Running: {}", self.command_line(segments));

        let output = Command::new(&self.program)
            .args(&self.options)
            .args(segments)
            .stdin(Stdio::null())
            .stdout(Stdio::from(sink))
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| ReportError::DecodeFailure {
                status: "not started".to_string(),
                message: format!("cannot run {}: {e}", self.program.to_string_lossy()),
            })?;

        let message = sanitize_decoder_stderr(&output.stderr);
        if output.status.success() {
            if !message.is_empty() {
                warn!("Decoder reported: {message}");
            }
            return Ok(DecodeOutcome::Clean);
        }

        let status = output.status.to_string();
        if output.stderr.is_empty() {
            warn!("Decoder {status} without an error message; continuing with its output");
            return Ok(DecodeOutcome::CompletedWithWarning { status });
        }
        let message = if message.is_empty() {
            "no printable error text".to_string()
        } else {
            message
        };
        Err(ReportError::DecodeFailure { status, message })
    }
}
