//! CLI argument parsing module for lockdrift

use crate::error::ConfigError;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Parse a timeout given in whole seconds; zero is rejected
fn parse_timeout(s: &str) -> Result<Duration, String> {
    let invalid = || {
        ConfigError::InvalidTimeout {
            value: s.to_string(),
        }
        .to_string()
    };

    let secs: u64 = s.trim().parse().map_err(|_| invalid())?;
    if secs == 0 {
        return Err(invalid());
    }

    Ok(Duration::from_secs(secs))
}

/// Compare locked, installable and latest versions of npm dependencies
#[derive(Parser, Debug, Clone)]
#[command(
    name = "lockdrift",
    version,
    about = "Compare locked, installable and latest versions of npm dependencies"
)]
pub struct CliArgs {
    /// Directory containing package.json and package-lock.json
    #[arg(short = 'd', long = "dir", default_value = ".")]
    pub dir: PathBuf,

    /// Show all dependencies, including those that have not drifted
    #[arg(short = 'a', long)]
    pub all: bool,

    // Output options
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable quiet mode - no progress display
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    // Registry options
    /// Registry base URL
    #[arg(long, env = "NPM_CONFIG_REGISTRY", hide_env_values = true)]
    pub registry: Option<String>,

    /// Timeout for each registry query, in seconds
    #[arg(long, value_parser = parse_timeout, default_value = "30")]
    pub timeout: Duration,

    /// Query versions through `npm view` instead of the registry HTTP API
    #[arg(long)]
    pub npm_cli: bool,
}
