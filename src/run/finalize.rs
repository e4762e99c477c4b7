//! Run finalization and cleanup.

use std::fs;
use std::path::Path;

use log::{debug, warn};

/// Deletes the combined log.
///
/// Failure is logged and reported through the return value; it never fails the run.
pub fn remove_raw_log(path: &Path) -> bool {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!("Removed {}", path.display());
            true
        }
        Err(e) => {
            warn!("Could not remove {}: {e}", path.display());
            false
        }
    }
}
