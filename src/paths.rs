//! Source and output directory resolution.
//!
//! Both directories are normalized to end with a path separator, must not be
//! the filesystem root, and must be accessible to the invoking user: readable
//! for the segment source, writable for the output.

use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR, MAIN_SEPARATOR_STR};

use log::debug;
use nix::unistd::{access, AccessFlags};

use crate::config::DEFAULT_SOURCE_DIR;
use crate::error_handling::ReportError;
use crate::utils::current_username;

/// What a directory is used for; selects the default and the access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRole {
    Source,
    Output,
}

impl PathRole {
    fn required_access(self) -> AccessFlags {
        match self {
            PathRole::Source => AccessFlags::R_OK | AccessFlags::X_OK,
            PathRole::Output => AccessFlags::W_OK | AccessFlags::X_OK,
        }
    }

    fn access_word(self) -> &'static str {
        match self {
            PathRole::Source => "readable",
            PathRole::Output => "writable",
        }
    }
}

impl fmt::Display for PathRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathRole::Source => f.write_str("binary logs"),
            PathRole::Output => f.write_str("output"),
        }
    }
}

/// Resolves the segment source directory; empty means the default data directory.
///
/// # Errors
///
/// [`ReportError::RootPathRejected`] or [`ReportError::PathUnavailable`].
pub fn resolve_source_dir(spec: &str) -> Result<PathBuf, ReportError> {
    let raw = match spec.trim() {
        "" => PathBuf::from(DEFAULT_SOURCE_DIR),
        path => PathBuf::from(path),
    };
    resolve_dir(&raw, PathRole::Source)
}

/// Resolves the output directory; empty means the current working directory.
///
/// # Errors
///
/// [`ReportError::RootPathRejected`], [`ReportError::PathUnavailable`], or
/// [`ReportError::IoFailure`] when the working directory cannot be determined.
pub fn resolve_output_dir(spec: &str) -> Result<PathBuf, ReportError> {
    let raw = match spec.trim() {
        "" => std::env::current_dir().map_err(|source| ReportError::IoFailure {
            action: "determine current directory",
            path: PathBuf::from("."),
            source,
        })?,
        path => PathBuf::from(path),
    };
    resolve_dir(&raw, PathRole::Output)
}

fn resolve_dir(raw: &Path, role: PathRole) -> Result<PathBuf, ReportError> {
    let normalized = with_trailing_separator(raw);

    if reduces_to_root(&normalized) {
        return Err(ReportError::RootPathRejected {
            role,
            path: normalized.display().to_string(),
        });
    }

    let unavailable = |reason: String| ReportError::PathUnavailable {
        role,
        path: normalized.display().to_string(),
        user: current_username(),
        reason,
    };

    match fs::metadata(&normalized) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Err(unavailable("not a directory".to_string())),
        Err(e) => return Err(unavailable(e.to_string())),
    }

    access(normalized.as_path(), role.required_access())
        .map_err(|errno| unavailable(format!("not {} ({errno})", role.access_word())))?;

    debug!("Using {role} directory {}", normalized.display());
    Ok(normalized)
}

/// Appends a separator unless the path already ends with one.
pub fn with_trailing_separator(path: &Path) -> PathBuf {
    let mut raw = path.as_os_str().to_os_string();
    if !raw.to_string_lossy().ends_with(MAIN_SEPARATOR) {
        raw.push(MAIN_SEPARATOR_STR);
    }
    PathBuf::from(raw)
}

/// True for `/`, `//`, `/./..` and anything that canonicalizes to `/`.
fn reduces_to_root(path: &Path) -> bool {
    let lexical_root = path.has_root()
        && path
            .components()
            .all(|c| matches!(c, Component::RootDir | Component::CurDir | Component::ParentDir));
    lexical_root
        || fs::canonicalize(path)
            .map(|canonical| canonical.parent().is_none())
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolved_dir_ends_with_separator() {
        let dir = TempDir::new().unwrap();
        let spec = dir.path().to_string_lossy().to_string();
        assert!(!spec.ends_with('/'));

        let source = resolve_source_dir(&spec).unwrap();
        let output = resolve_output_dir(&spec).unwrap();
        assert_eq!(source, PathBuf::from(format!("{spec}/")));
        assert_eq!(source, output);
    }

    #[test]
    fn test_existing_separator_is_not_doubled() {
        let dir = TempDir::new().unwrap();
        let spec = format!("{}/", dir.path().display());
        let resolved = resolve_source_dir(&spec).unwrap();
        assert_eq!(resolved.to_string_lossy(), spec);
    }

    #[test]
    fn test_root_is_rejected() {
        for spec in ["/", "//", "/./", "/..", "/tmp/.."] {
            let err = resolve_source_dir(spec).unwrap_err();
            assert!(
                matches!(err, ReportError::RootPathRejected { role: PathRole::Source, .. }),
                "{spec} should be rejected as root, got {err:?}"
            );
            let err = resolve_output_dir(spec).unwrap_err();
            assert!(matches!(
                err,
                ReportError::RootPathRejected { role: PathRole::Output, .. }
            ));
        }
    }

    #[test]
    fn test_missing_dir_is_unavailable_and_names_user() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let err = resolve_source_dir(&missing.to_string_lossy()).unwrap_err();
        match &err {
            ReportError::PathUnavailable { path, user, .. } => {
                assert!(path.ends_with("nope/"));
                assert_eq!(user, &current_username());
            }
            other => panic!("expected PathUnavailable, got {other:?}"),
        }
        assert!(err.to_string().contains(&current_username()));
    }

    #[test]
    fn test_regular_file_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("plain.txt");
        std::fs::write(&file, "x").unwrap();
        let err = resolve_output_dir(&file.to_string_lossy()).unwrap_err();
        assert!(matches!(err, ReportError::PathUnavailable { .. }));
    }

    #[test]
    fn test_unwritable_output_is_unavailable() {
        use std::os::unix::fs::PermissionsExt;

        // Root bypasses permission bits.
        if nix::unistd::Uid::effective().is_root() {
            return;
        }
        let dir = TempDir::new().unwrap();
        let locked = dir.path().join("locked");
        std::fs::create_dir(&locked).unwrap();
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o555)).unwrap();

        let err = resolve_output_dir(&locked.to_string_lossy()).unwrap_err();
        assert!(matches!(err, ReportError::PathUnavailable { role: PathRole::Output, .. }));
        // Still readable, so usable as a source.
        assert!(resolve_source_dir(&locked.to_string_lossy()).is_ok());

        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn test_empty_output_defaults_to_current_dir() {
        let resolved = resolve_output_dir("").unwrap();
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(resolved, with_trailing_separator(&cwd));
    }
}
