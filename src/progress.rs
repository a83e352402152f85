//! Terminal feedback on stderr while a check runs
//!
//! A spinner covers reading the project files, then a counted bar follows
//! the dependencies as they are resolved.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const SPINNER_TICKS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";
const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg}";
const BAR_TEMPLATE: &str = "{spinner:.cyan} {msg} [{bar:30.cyan/blue}] {pos}/{len}";

/// Spinner or bar shown on stderr, or nothing when disabled
pub struct Progress {
    enabled: bool,
    bar: Option<ProgressBar>,
}

impl Progress {
    /// Reporter that draws only when `enabled`
    pub fn new(enabled: bool) -> Self {
        Self { enabled, bar: None }
    }

    /// Reporter that never draws (quiet and JSON runs, tests)
    pub fn disabled() -> Self {
        Self::new(false)
    }

    /// Spin while something of unknown length happens
    pub fn loading(&mut self, message: &str) {
        let style = ProgressStyle::default_spinner()
            .tick_chars(SPINNER_TICKS)
            .template(SPINNER_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        self.show(ProgressBar::new_spinner(), style, message, 80);
    }

    /// Count `total` dependencies
    pub fn counting(&mut self, total: u64, message: &str) {
        let style = ProgressStyle::default_bar()
            .template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░");
        self.show(ProgressBar::new(total), style, message, 100);
    }

    fn show(&mut self, bar: ProgressBar, style: ProgressStyle, message: &str, tick_ms: u64) {
        if !self.enabled {
            return;
        }
        self.clear();

        bar.set_style(style);
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(tick_ms));
        self.bar = Some(bar);
    }

    /// Name the dependency being checked
    pub fn current(&self, name: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(name.to_string());
        }
    }

    /// One dependency done
    pub fn advance(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    /// Run `f` with the bar hidden, so lines written to stderr stay intact
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        match &self.bar {
            Some(bar) => bar.suspend(f),
            None => f(),
        }
    }

    /// Remove whatever is drawn
    pub fn clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
