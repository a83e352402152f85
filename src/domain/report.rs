//! Report assembly from classified dependencies
//!
//! `present` applies the inclusion rule; styling is left to the formatters.

use super::{Comparison, Dependency, ResolvedVersion};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Message shown in place of rows when nothing drifted
pub const NO_DIFFERENCES: &str =
    "No differences between a reproducible install and a fresh install";

/// Which of the three version columns a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionColumn {
    /// Version pinned in package-lock.json
    Locked,
    /// Version the range resolves to
    Installable,
    /// Version tagged `latest`
    Latest,
}

impl fmt::Display for VersionColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionColumn::Locked => write!(f, "locked"),
            VersionColumn::Installable => write!(f, "installable"),
            VersionColumn::Latest => write!(f, "latest"),
        }
    }
}

/// Reason a dependency was left out of the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SkipReason {
    /// A version column resolved to a sentinel
    Unresolved {
        column: VersionColumn,
        value: ResolvedVersion,
    },
    /// Classification rejected one of the versions
    Invalid { message: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Unresolved { column, value } => write!(f, "{} version: {}", column, value),
            SkipReason::Invalid { message } => write!(f, "{}", message),
        }
    }
}

/// A dependency that could not be classified
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedDependency {
    /// The dependency that was skipped
    pub dependency: Dependency,
    /// Why it was skipped
    pub reason: SkipReason,
}

impl SkippedDependency {
    /// Creates a new skipped entry
    pub fn new(dependency: Dependency, reason: SkipReason) -> Self {
        Self { dependency, reason }
    }
}

/// A dependency together with its three-way comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedDependency {
    /// The declared dependency
    pub dependency: Dependency,
    /// Its comparison result
    pub comparison: Comparison,
}

impl ClassifiedDependency {
    /// Creates a new classified entry
    pub fn new(dependency: Dependency, comparison: Comparison) -> Self {
        Self {
            dependency,
            comparison,
        }
    }
}

/// Rows selected for display
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Report {
    /// Included rows, in manifest order
    pub rows: Vec<ClassifiedDependency>,
}

impl Report {
    /// Returns true when the report collapses to the "no differences" row
    pub fn has_no_differences(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows with drift
    pub fn drift_count(&self) -> usize {
        self.rows.iter().filter(|r| r.comparison.has_drift()).count()
    }
}

/// Select the rows to display
///
/// A row is kept when `show_all` is set or when either the installable or
/// latest version drifted from the lockfile.
pub fn present(results: &[ClassifiedDependency], show_all: bool) -> Report {
    let rows = results
        .iter()
        .filter(|r| show_all || r.comparison.has_drift())
        .cloned()
        .collect();
    Report { rows }
}
