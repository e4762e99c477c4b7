//! Operation kinds and the operator's selection of them.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use strum::IntoEnumIterator;
use strum_macros::EnumIter as EnumIterMacro;

use crate::error_handling::ReportError;

/// Category of data-mutating statement counted in the report.
///
/// Declaration order is the canonical report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIterMacro)]
pub enum OperationKind {
    Update,
    Insert,
    Delete,
    Truncate,
    Drop,
}

impl OperationKind {
    /// Statement keyword a matching line starts with.
    pub fn keyword(&self) -> &'static str {
        match self {
            OperationKind::Update => "UPDATE",
            OperationKind::Insert => "INSERT",
            OperationKind::Delete => "DELETE",
            OperationKind::Truncate => "TRUNCATE",
            OperationKind::Drop => "DROP",
        }
    }

    /// Name accepted on the command line.
    pub fn cli_name(&self) -> &'static str {
        match self {
            OperationKind::Update => "update",
            OperationKind::Insert => "insert",
            OperationKind::Delete => "delete",
            OperationKind::Truncate => "truncate",
            OperationKind::Drop => "drop",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Set of operation kinds to report on, iterated in canonical order.
///
/// Parsed from a comma-separated list where `all` expands to every kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationFilter {
    kinds: BTreeSet<OperationKind>,
}

impl OperationFilter {
    /// Every operation kind.
    pub fn all() -> Self {
        Self {
            kinds: OperationKind::iter().collect(),
        }
    }

    pub fn contains(&self, kind: OperationKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Selected kinds in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = OperationKind> + '_ {
        self.kinds.iter().copied()
    }
}

impl Default for OperationFilter {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<OperationKind> for OperationFilter {
    fn from_iter<I: IntoIterator<Item = OperationKind>>(iter: I) -> Self {
        Self {
            kinds: iter.into_iter().collect(),
        }
    }
}

impl FromStr for OperationFilter {
    type Err = ReportError;

    /// Case-insensitive; blank entries are skipped and a blank list means `all`.
    fn from_str(list: &str) -> Result<Self, Self::Err> {
        let mut kinds = BTreeSet::new();
        for name in list.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            let name = name.to_ascii_lowercase();
            if name == "all" {
                kinds.extend(OperationKind::iter());
                continue;
            }
            let kind = OperationKind::iter()
                .find(|kind| kind.cli_name() == name)
                .ok_or_else(|| ReportError::UnknownOperation {
                    value: name.clone(),
                })?;
            kinds.insert(kind);
        }

        if kinds.is_empty() {
            return Ok(Self::all());
        }
        Ok(Self { kinds })
    }
}

impl fmt::Display for OperationFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|k| k.cli_name()).collect();
        f.write_str(&names.join(","))
    }
}
