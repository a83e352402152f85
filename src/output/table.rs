//! Table output formatter for human-readable display
//!
//! This module provides:
//! - One aligned row per reported dependency
//! - Severity coloring of the version columns
//! - Range and diff-kind annotations
//! - A single full-width row when nothing drifted

use crate::domain::{ClassifiedDependency, Report, NO_DIFFERENCES};
use crate::orchestrator::OrchestratorResult;
use crate::output::{OutputFormatter, Severity};
use colored::Colorize;
use std::io::Write;

/// Column headers, in display order
const HEADERS: [&str; 5] = ["Package", "Type", "Locked", "Installable", "Latest"];

/// Space between columns
const GAP: &str = "  ";

/// A table cell: the unstyled text drives alignment, the styled text is printed
#[derive(Debug, Clone, PartialEq, Eq)]
struct Cell {
    plain: String,
    styled: String,
}

impl Cell {
    fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            styled: text.clone(),
            plain: text,
        }
    }

    fn width(&self) -> usize {
        self.plain.chars().count()
    }
}

/// Table formatter for human-readable output
pub struct TableFormatter {
    /// Show rows without drift
    show_all: bool,
    /// Whether to use colors
    color: bool,
}

impl TableFormatter {
    /// Create a new table formatter with color option
    pub fn with_color(show_all: bool, color: bool) -> Self {
        Self { show_all, color }
    }

    fn paint(&self, severity: Severity, text: &str) -> String {
        if self.color {
            severity.paint(text)
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    /// Version cell with an optional trailing annotation
    fn version_cell(&self, severity: Severity, version: &str, note: Option<String>) -> Cell {
        match note {
            Some(note) => {
                let note = format!("({})", note);
                Cell {
                    plain: format!("{} {}", version, note),
                    styled: format!("{} {}", self.paint(severity, version), self.dim(&note)),
                }
            }
            None => Cell {
                plain: version.to_string(),
                styled: self.paint(severity, version),
            },
        }
    }

    fn row_cells(&self, row: &ClassifiedDependency) -> [Cell; 5] {
        let comparison = &row.comparison;
        let severity = Severity::of(comparison);

        let range = (!comparison.range.is_empty()).then(|| comparison.range.clone());
        let diff = comparison
            .diff
            .filter(|_| comparison.latest_changed)
            .map(|d| d.to_string());

        [
            Cell::plain(row.dependency.name.clone()),
            Cell::plain(row.dependency.kind.label()),
            self.version_cell(severity, &comparison.locked, None),
            self.version_cell(severity, &comparison.installable, range),
            self.version_cell(severity, &comparison.latest, diff),
        ]
    }

    fn write_line(
        &self,
        writer: &mut dyn Write,
        cells: &[Cell],
        widths: &[usize],
    ) -> std::io::Result<()> {
        let last = cells.len().saturating_sub(1);
        let mut line = String::new();
        for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
            line.push_str(&cell.styled);
            if i < last {
                line.push_str(&" ".repeat(width.saturating_sub(cell.width())));
                line.push_str(GAP);
            }
        }
        writeln!(writer, "{}", line)
    }
}

impl OutputFormatter for TableFormatter {
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        self.format_report(&result.report(self.show_all), writer)
    }

    fn format_report(&self, report: &Report, writer: &mut dyn Write) -> std::io::Result<()> {
        let rows: Vec<[Cell; 5]> = report.rows.iter().map(|r| self.row_cells(r)).collect();

        let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.chars().count()).collect();
        for cells in &rows {
            for (width, cell) in widths.iter_mut().zip(cells.iter()) {
                *width = (*width).max(cell.width());
            }
        }

        let message_width = NO_DIFFERENCES.chars().count();
        if report.has_no_differences() {
            let total: usize = widths.iter().sum::<usize>() + GAP.len() * (widths.len() - 1);
            if let Some(last) = widths.last_mut() {
                *last += message_width.saturating_sub(total);
            }
        }

        let header: Vec<Cell> = HEADERS
            .iter()
            .map(|h| {
                let styled = if self.color {
                    h.bold().to_string()
                } else {
                    h.to_string()
                };
                Cell {
                    plain: h.to_string(),
                    styled,
                }
            })
            .collect();
        self.write_line(writer, &header, &widths)?;

        let separator: Vec<Cell> = widths.iter().map(|w| Cell::plain("-".repeat(*w))).collect();
        self.write_line(writer, &separator, &widths)?;

        if report.has_no_differences() {
            writeln!(writer, "{}", NO_DIFFERENCES)?;
            return Ok(());
        }

        for cells in &rows {
            self.write_line(writer, cells, &widths)?;
        }

        Ok(())
    }
}
