//! lockdrift - npm dependency drift CLI tool
//!
//! Shows, per dependency, how the version pinned in package-lock.json
//! compares with what a fresh install of the declared range would pick
//! and with the latest published version.

use clap::Parser;
use lockdrift::cli::CliArgs;
use lockdrift::config::Settings;
use lockdrift::logging;
use lockdrift::orchestrator::Orchestrator;
use lockdrift::output::create_formatter;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    logging::init(args.verbose);

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let settings = Settings::from_cli(&args)?;

    debug!("lockdrift v{}", env!("CARGO_PKG_VERSION"));
    debug!("target: {}", settings.dir.display());
    if settings.use_npm_cli {
        debug!("registry: npm CLI");
    } else {
        debug!("registry: {}", settings.registry_url);
    }

    let orchestrator = Orchestrator::new(&settings)?;
    let result = orchestrator.run_in_dir(&settings.dir).await?;

    // Output results
    let formatter = create_formatter(settings.output_config());
    let mut stdout = io::stdout().lock();
    formatter.format(&result, &mut stdout)?;
    stdout.flush()?;

    if settings.verbose {
        let report = result.report(settings.show_all);
        info!(
            "{} shown, {} drifted, {} skipped",
            report.rows.len(),
            report.drift_count(),
            result.skipped.len()
        );
    }

    Ok(ExitCode::SUCCESS)
}
