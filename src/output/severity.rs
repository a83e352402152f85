//! Display severity of a comparison

use crate::domain::Comparison;
use colored::Colorize;

/// How loudly a row's versions are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Nothing drifted
    Unchanged,
    /// Drift within the same major version, or only the installable drifted
    Mild,
    /// Latest moved to another major version
    Strong,
}

impl Severity {
    /// Severity of a comparison
    ///
    /// Latest drift takes precedence over installable drift.
    pub fn of(comparison: &Comparison) -> Self {
        if comparison.latest_changed {
            if comparison.major_changed {
                Severity::Strong
            } else {
                Severity::Mild
            }
        } else if comparison.installable_changed {
            Severity::Mild
        } else {
            Severity::Unchanged
        }
    }

    /// Style `text` for this severity
    pub fn paint(&self, text: &str) -> String {
        match self {
            Severity::Strong => text.red().bold().to_string(),
            Severity::Mild => text.yellow().to_string(),
            Severity::Unchanged => text.to_string(),
        }
    }

    /// Plain label
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Unchanged => "unchanged",
            Severity::Mild => "mild",
            Severity::Strong => "strong",
        }
    }
}
