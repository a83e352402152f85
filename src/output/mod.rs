//! Output formatting for drift reports
//!
//! This module provides:
//! - Table output for human-readable display
//! - JSON output for machine processing
//! - Severity styling shared by both

mod json;
mod severity;
mod table;

pub use json::JsonFormatter;
pub use severity::Severity;
pub use table::TableFormatter;

use crate::domain::Report;
use crate::orchestrator::OrchestratorResult;
use std::io::Write;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned table for terminals
    #[default]
    Table,
    /// JSON output for machine processing
    Json,
}

/// Configuration for output formatting
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Output format (table, json)
    pub format: OutputFormat,
    /// Whether to use colors (when supported)
    pub color: bool,
    /// Include dependencies that have not drifted
    pub show_all: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
            show_all: false,
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and write the orchestrator result
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()>;

    /// Format and write an already assembled report
    fn format_report(&self, report: &Report, writer: &mut dyn Write) -> std::io::Result<()>;
}

/// Create a formatter based on configuration
pub fn create_formatter(config: OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::Table => Box::new(TableFormatter::with_color(config.show_all, config.color)),
        OutputFormat::Json => Box::new(JsonFormatter::new(config.show_all)),
    }
}
