//! Line scan of the combined log into per-operation counts.
//!
//! A line belongs to an operation kind when it starts with the kind's keyword,
//! either directly (statement events) or after the decoder's `### ` row-event
//! marker. Identical lines are grouped and counted; rows are ordered by line
//! text.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::Path;

use log::{debug, info};
use strum::IntoEnumIterator;

use crate::config::ROW_EVENT_MARKER;
use crate::error_handling::ReportError;
use crate::report::{OperationFilter, OperationKind, OperationReport, ReportRow, ReportSection};
use crate::utils::current_username;

/// Kind of statement a decoded line records, if any.
pub fn classify_line(line: &str) -> Option<OperationKind> {
    let statement = line.strip_prefix(ROW_EVENT_MARKER).unwrap_or(line);
    OperationKind::iter().find(|kind| statement.starts_with(kind.keyword()))
}

/// Scans decoded text and counts matching lines for the selected kinds.
///
/// Lines are read as bytes and decoded lossily; a trailing `\r` is dropped.
/// Every selected kind gets a section, empty or not.
pub fn scan_operations<R: BufRead>(
    mut reader: R,
    filter: &OperationFilter,
) -> std::io::Result<OperationReport> {
    let mut counts: BTreeMap<OperationKind, BTreeMap<String, usize>> =
        filter.iter().map(|kind| (kind, BTreeMap::new())).collect();

    let mut buf = Vec::new();
    let mut lines_read = 0usize;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        lines_read += 1;

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches('\n').trim_end_matches('\r');
        let Some(kind) = classify_line(line).filter(|kind| filter.contains(*kind)) else {
            continue;
        };
        *counts
            .entry(kind)
            .or_default()
            .entry(line.to_string())
            .or_insert(0) += 1;
    }
    debug!("Scanned {lines_read} decoded lines");

    let sections = counts
        .into_iter()
        .map(|(kind, per_line)| ReportSection {
            kind,
            rows: per_line
                .into_iter()
                .map(|(statement, count)| ReportRow { count, statement })
                .collect(),
        })
        .collect();

    Ok(OperationReport { sections })
}

/// Builds the report from the combined log and writes it to `destination`.
///
/// # Errors
///
/// - [`ReportError::SourceUnreadable`] if the combined log cannot be opened or read
/// - [`ReportError::IoFailure`] if the report cannot be written
pub fn build_report(
    combined_log: &Path,
    filter: &OperationFilter,
    destination: &Path,
) -> Result<OperationReport, ReportError> {
    let unreadable = |source: std::io::Error| ReportError::SourceUnreadable {
        path: combined_log.to_path_buf(),
        user: current_username(),
        source,
    };

    let reader = BufReader::new(File::open(combined_log).map_err(unreadable)?);
    let report = scan_operations(reader, filter).map_err(unreadable)?;

    for section in &report.sections {
        info!(
            "{}: {} distinct statements, {} occurrences",
            section.kind,
            section.rows.len(),
            section.total_occurrences()
        );
    }

    let write_failure = |source: std::io::Error| ReportError::IoFailure {
        action: "write report",
        path: destination.to_path_buf(),
        source,
    };
    let file = File::create(destination).map_err(write_failure)?;
    report.write_to(BufWriter::new(file)).map_err(write_failure)?;

    Ok(report)
}
