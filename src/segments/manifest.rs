//! Segment manifest: the selected paths, one per line.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error_handling::ReportError;

/// Writes `segments` to `destination`, one path per line, replacing its content.
///
/// # Errors
///
/// [`ReportError::IoFailure`] with the OS reason and the destination path.
pub fn write_segment_list(segments: &[PathBuf], destination: &Path) -> Result<(), ReportError> {
    let failure = |source: std::io::Error| ReportError::IoFailure {
        action: "write segment list",
        path: destination.to_path_buf(),
        source,
    };

    let mut out = BufWriter::new(File::create(destination).map_err(failure)?);
    for segment in segments {
        out.write_all(segment.as_os_str().as_bytes())
            .map_err(failure)?;
        out.write_all(b"\n").map_err(failure)?;
    }
    out.flush().map_err(failure)?;

    debug!(
        "Wrote {} segment paths to {}",
        segments.len(),
        destination.display()
    );
    Ok(())
}
