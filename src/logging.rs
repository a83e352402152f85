//! Diagnostic logging setup
//!
//! Warnings and debug output go to stderr through `tracing`; stdout is
//! reserved for the report.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log filter
pub const LOG_ENV: &str = "LOCKDRIFT_LOG";

static INIT_ONCE: Once = Once::new();

/// Filter used when `LOCKDRIFT_LOG` is not set
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "lockdrift=debug"
    } else {
        "lockdrift=warn"
    }
}

/// Initialize the logging facility
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init(verbose: bool) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .try_init();
    });
}
