//! JSON output formatter for machine processing
//!
//! Emits the displayed rows, the skipped dependencies and whether the
//! report collapsed to "no differences".

use crate::domain::{DiffKind, Report, SkippedDependency};
use crate::orchestrator::OrchestratorResult;
use crate::output::{OutputFormatter, Severity};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Include rows without drift
    show_all: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(show_all: bool) -> Self {
        Self { show_all }
    }
}

/// JSON representation of the full result
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// True when no row qualified for display
    no_differences: bool,
    rows: Vec<JsonRow<'a>>,
    skipped: Vec<JsonSkip>,
}

/// JSON representation of a report row
#[derive(Serialize)]
struct JsonRow<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    locked: &'a str,
    installable: &'a str,
    range: &'a str,
    latest: &'a str,
    installable_changed: bool,
    latest_changed: bool,
    major_changed: bool,
    diff: Option<DiffKind>,
    severity: &'static str,
}

/// JSON representation of a skipped dependency
#[derive(Serialize)]
struct JsonSkip {
    name: String,
    #[serde(rename = "type")]
    kind: &'static str,
    reason: String,
}

impl<'a> JsonOutput<'a> {
    fn new(report: &'a Report, skipped: &[SkippedDependency]) -> Self {
        let rows = report
            .rows
            .iter()
            .map(|row| {
                let c = &row.comparison;
                JsonRow {
                    name: &row.dependency.name,
                    kind: row.dependency.kind.label(),
                    locked: &c.locked,
                    installable: &c.installable,
                    range: &c.range,
                    latest: &c.latest,
                    installable_changed: c.installable_changed,
                    latest_changed: c.latest_changed,
                    major_changed: c.major_changed,
                    diff: c.diff,
                    severity: Severity::of(c).label(),
                }
            })
            .collect();

        let skipped = skipped
            .iter()
            .map(|s| JsonSkip {
                name: s.dependency.name.clone(),
                kind: s.dependency.kind.label(),
                reason: s.reason.to_string(),
            })
            .collect();

        Self {
            no_differences: report.has_no_differences(),
            rows,
            skipped,
        }
    }
}

fn write_json(output: &JsonOutput<'_>, writer: &mut dyn Write) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(output)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{}", json)
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let report = result.report(self.show_all);
        write_json(&JsonOutput::new(&report, &result.skipped), writer)
    }

    fn format_report(&self, report: &Report, writer: &mut dyn Write) -> std::io::Result<()> {
        write_json(&JsonOutput::new(report, &[]), writer)
    }
}
