//! Report data model and its text rendering.

use std::io::{self, Write};

use crate::config::SECTION_RULE;
use crate::report::OperationKind;

/// One `(occurrences, statement line)` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub count: usize,
    pub statement: String,
}

/// Rows for one operation kind, sorted by statement text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    pub kind: OperationKind,
    pub rows: Vec<ReportRow>,
}

impl ReportSection {
    /// Number of matching lines, duplicates included.
    pub fn total_occurrences(&self) -> usize {
        self.rows.iter().map(|row| row.count).sum()
    }
}

/// The finished report: one section per requested kind, in canonical order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationReport {
    pub sections: Vec<ReportSection>,
}

impl OperationReport {
    pub fn section(&self, kind: OperationKind) -> Option<&ReportSection> {
        self.sections.iter().find(|section| section.kind == kind)
    }

    /// Rows across all sections.
    pub fn total_rows(&self) -> usize {
        self.sections.iter().map(|section| section.rows.len()).sum()
    }

    /// Writes the report text.
    ///
    /// ```text
    /// UPDATE Operations
    /// ==============================
    /// 2 UPDATE t SET a=1
    ///
    /// INSERT Operations
    /// ==============================
    /// 1 INSERT INTO t VALUES (1)
    /// ```
    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        for (index, section) in self.sections.iter().enumerate() {
            if index > 0 {
                writeln!(out)?;
            }
            writeln!(out, "{} Operations", section.kind.keyword())?;
            writeln!(out, "{SECTION_RULE}")?;
            for row in &section.rows {
                writeln!(out, "{} {}", row.count, row.statement)?;
            }
        }
        out.flush()
    }
}
