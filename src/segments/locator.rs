//! Discovery of binary log segments by name and modification time.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Timelike};
use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::error_handling::ReportError;
use crate::window::TimeWindow;

/// A segment found on disk, before it is reduced to its path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSegment {
    pub path: PathBuf,
    /// Modification time, whole seconds
    pub modified_at: DateTime<Local>,
}

/// Whether `file_name` is exactly `<prefix>.<digits>`.
///
/// The prefix is compared literally; regex metacharacters in it have no meaning.
pub fn is_segment_name(file_name: &str, prefix: &str) -> bool {
    file_name
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('.'))
        .is_some_and(|suffix| !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()))
}

/// Walks `source_dir` recursively and returns every segment-named regular file.
///
/// Entries that cannot be read are logged and skipped. Order is unspecified.
pub fn find_segments(source_dir: &Path, prefix: &str) -> Vec<LogSegment> {
    let mut found = Vec::new();

    for entry in WalkDir::new(source_dir).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {e}", source_dir.display());
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if !is_segment_name(name, prefix) {
            continue;
        }

        let modified = match entry.metadata().map(|m| m.modified()) {
            Ok(Ok(modified)) => modified,
            Ok(Err(e)) => {
                warn!("Skipping {}: no modification time ({e})", entry.path().display());
                continue;
            }
            Err(e) => {
                warn!("Skipping {}: {e}", entry.path().display());
                continue;
            }
        };
        let modified_at = DateTime::<Local>::from(modified);
        found.push(LogSegment {
            path: entry.into_path(),
            modified_at: modified_at.with_nanosecond(0).unwrap_or(modified_at),
        });
    }

    found
}

/// Returns the paths of segments modified within `window`, sorted by path.
///
/// Paths sort bytewise, which for the zero-padded numeric suffix is also the
/// order the server wrote the segments in.
///
/// # Errors
///
/// [`ReportError::NoMatchingSegments`] when nothing is selected.
pub fn locate_segments(
    window: &TimeWindow,
    source_dir: &Path,
    prefix: &str,
) -> Result<Vec<PathBuf>, ReportError> {
    let candidates = find_segments(source_dir, prefix);
    debug!(
        "Found {} files named {prefix}.<digits> under {}",
        candidates.len(),
        source_dir.display()
    );

    let mut selected: Vec<PathBuf> = candidates
        .into_iter()
        .filter(|segment| {
            let inside = window.contains(segment.modified_at);
            debug!(
                "{} modified {} ({})",
                segment.path.display(),
                segment.modified_at.format(crate::config::DATETIME_FORMAT),
                if inside { "selected" } else { "outside window" }
            );
            inside
        })
        .map(|segment| segment.path)
        .collect();
    selected.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));

    if selected.is_empty() {
        return Err(ReportError::NoMatchingSegments {
            dir: source_dir.to_path_buf(),
            prefix: prefix.to_string(),
            start: window.start_display(),
            end: window.end_display(),
        });
    }

    info!("Selected {} binary log segments", selected.len());
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs::File;
    use std::time::SystemTime;
    use tempfile::TempDir;

    fn at(d: u32, h: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, d, h, 0, 0).single().unwrap()
    }

    fn touch(path: &Path, modified: DateTime<Local>) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        let file = File::create(path).unwrap();
        file.set_modified(SystemTime::from(modified)).unwrap();
    }

    fn may_first() -> TimeWindow {
        TimeWindow::new(at(1, 0), Local.with_ymd_and_hms(2024, 5, 1, 23, 59, 59).unwrap()).unwrap()
    }

    #[test]
    fn test_is_segment_name() {
        assert!(is_segment_name("mysql-bin.000001", "mysql-bin"));
        assert!(is_segment_name("mysql-bin.1", "mysql-bin"));
        assert!(!is_segment_name("mysql-bin.index", "mysql-bin"));
        assert!(!is_segment_name("mysql-bin.", "mysql-bin"));
        assert!(!is_segment_name("mysql-bin.000001.gz", "mysql-bin"));
        assert!(!is_segment_name("xmysql-bin.000001", "mysql-bin"));
        assert!(!is_segment_name("mysql-binX000001", "mysql-bin"));
        // Metacharacters in the prefix are literal.
        assert!(is_segment_name("bin.log.000003", "bin.log"));
        assert!(!is_segment_name("binXlog.000003", "bin.log"));
        assert!(is_segment_name("a+b.12", "a+b"));
    }

    #[test]
    fn test_only_segments_inside_window_are_selected() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("mysql-bin.000001"), at(1, 12));
        touch(&dir.path().join("mysql-bin.000002"), at(3, 12));

        let found = locate_segments(&may_first(), dir.path(), "mysql-bin").unwrap();
        assert_eq!(found, vec![dir.path().join("mysql-bin.000001")]);
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("mysql-bin.000001"), at(1, 0));
        touch(
            &dir.path().join("mysql-bin.000002"),
            Local.with_ymd_and_hms(2024, 5, 1, 23, 59, 59).unwrap(),
        );
        touch(&dir.path().join("mysql-bin.000003"), at(2, 0));

        let found = locate_segments(&may_first(), dir.path(), "mysql-bin").unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_walk_is_recursive_and_sorted() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("b/mysql-bin.000001"), at(1, 3));
        touch(&dir.path().join("mysql-bin.000010"), at(1, 2));
        touch(&dir.path().join("mysql-bin.000002"), at(1, 1));
        touch(&dir.path().join("a/mysql-bin.000005"), at(1, 4));
        touch(&dir.path().join("mysql-bin.index"), at(1, 5));
        touch(&dir.path().join("relay-bin.000001"), at(1, 5));

        let found = locate_segments(&may_first(), dir.path(), "mysql-bin").unwrap();
        let names: Vec<String> = found
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().display().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "a/mysql-bin.000005",
                "b/mysql-bin.000001",
                "mysql-bin.000002",
                "mysql-bin.000010",
            ]
        );
        let mut sorted = found.clone();
        sorted.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
        assert_eq!(found, sorted);
    }

    #[test]
    fn test_directories_with_segment_names_are_ignored() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("mysql-bin.000001")).unwrap();

        let err = locate_segments(&may_first(), dir.path(), "mysql-bin").unwrap_err();
        assert!(matches!(err, ReportError::NoMatchingSegments { .. }));
    }

    #[test]
    fn test_empty_selection_is_no_matching_segments() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("mysql-bin.000001"), at(5, 0));

        let err = locate_segments(&may_first(), dir.path(), "mysql-bin").unwrap_err();
        assert!(!err.is_fatal());
        assert!(err.to_string().contains("mysql-bin.<digits>"));
    }

    #[test]
    fn test_find_segments_truncates_subsecond_mtime() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mysql-bin.000001");
        let file = File::create(&path).unwrap();
        let precise = at(1, 12) + chrono::Duration::milliseconds(750);
        file.set_modified(SystemTime::from(precise)).unwrap();

        let found = find_segments(dir.path(), "mysql-bin");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].modified_at, at(1, 12));
    }
}
