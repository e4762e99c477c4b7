// Shared test helpers for building segment directories and a stand-in decoder.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local, TimeZone};

use binlog_report::Config;

/// Noon on 2024-05-01, local time: inside the `2024-05-01` window.
#[allow(dead_code)]
pub fn inside_window() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

/// Noon on 2024-05-03, local time: outside the `2024-05-01` window.
#[allow(dead_code)]
pub fn outside_window() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 5, 3, 12, 0, 0).unwrap()
}

/// Writes a "segment" whose content is already decoded text, with the given mtime.
#[allow(dead_code)]
pub fn write_segment(dir: &Path, name: &str, content: &str, modified: DateTime<Local>) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write segment");
    File::options()
        .write(true)
        .open(&path)
        .and_then(|f| f.set_modified(SystemTime::from(modified)))
        .expect("Failed to set segment mtime");
    path
}

/// Installs an executable decoder stand-in in `dir`.
///
/// It ignores `--` options and prints each segment file in argument order,
/// which is what the pipeline expects from the real decoder.
#[allow(dead_code)]
pub fn install_fake_decoder(dir: &Path) -> PathBuf {
    install_script(
        dir,
        "fake-mysqlbinlog",
        "#!/bin/sh\nfor arg in \"$@\"; do\n  case \"$arg\" in\n    --*) ;;\n    *) cat \"$arg\" ;;\n  esac\ndone\n",
    )
}

/// Installs an executable shell script in `dir`.
#[allow(dead_code)]
pub fn install_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o755)
        .open(&path)
        .expect("Failed to create script");
    file.write_all(body.as_bytes())
        .expect("Failed to write script");
    file.sync_all().expect("Failed to sync script");
    drop(file);
    path
}

/// Config for a one-day window over `source`, writing to `output`.
#[allow(dead_code)]
pub fn day_config(source: &Path, output: &Path, decoder: &Path, operations: &str) -> Config {
    Config {
        dt_from: "2024-05-01".to_string(),
        dt_to: "2024-05-01".to_string(),
        binary_logs_file_path: source.to_string_lossy().to_string(),
        binary_logs_file_name: "mysql-bin".to_string(),
        output_path: output.to_string_lossy().to_string(),
        sql_operations: operations.to_string(),
        decoder: decoder.to_string_lossy().to_string(),
        ..Default::default()
    }
}

/// Files directly inside `dir`, by name.
#[allow(dead_code)]
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to list directory")
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}
