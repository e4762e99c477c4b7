//! Output artifacts of a run.
//!
//! Names derive from the run's start instant so files from different runs do
//! not collide: `<YYYY-MM-DD>_<unix>_binary-logs-list.txt`,
//! `<YYYY-MM-DD>_<unix>_binary-logs-report.txt`, plus the transient
//! `mysql-raw.log`.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::debug;

use crate::config::{DATE_FORMAT, MANIFEST_FILE_SUFFIX, RAW_LOG_FILE_NAME, REPORT_FILE_SUFFIX};
use crate::error_handling::ReportError;

/// Paths of the three files a run writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFiles {
    /// Newline-delimited list of the selected segments
    pub manifest: PathBuf,
    /// Combined decoder output, removed after a successful report
    pub raw_log: PathBuf,
    /// Operation report
    pub report: PathBuf,
}

impl OutputFiles {
    pub fn for_run(output_dir: &Path, started_at: DateTime<Local>) -> Self {
        let stamp = format!(
            "{}_{}",
            started_at.format(DATE_FORMAT),
            started_at.timestamp()
        );
        Self {
            manifest: output_dir.join(format!("{stamp}_{MANIFEST_FILE_SUFFIX}")),
            raw_log: output_dir.join(RAW_LOG_FILE_NAME),
            report: output_dir.join(format!("{stamp}_{REPORT_FILE_SUFFIX}")),
        }
    }

    /// Creates (or truncates) all three files so output problems surface
    /// before any decoding starts. Handles are closed immediately.
    ///
    /// # Errors
    ///
    /// [`ReportError::IoFailure`] naming the first file that could not be created.
    pub fn create_all(&self) -> Result<(), ReportError> {
        for path in [&self.manifest, &self.raw_log, &self.report] {
            File::create(path).map_err(|source| ReportError::IoFailure {
                action: "create",
                path: path.clone(),
                source,
            })?;
            debug!("Created {}", path.display());
        }
        Ok(())
    }
}
