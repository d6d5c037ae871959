mod args;

use std::process::ExitCode;

use clap::Parser;
use perfgrade_core::report::{generate_report, render_summary};
use tracing_subscriber::EnvFilter;

use args::Args;

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries only the summary.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let quiet = args.quiet;
    let config = args.into_config();

    match generate_report(&config, chrono::Utc::now()) {
        Ok(Some(report)) => {
            if !quiet {
                print!("{}", render_summary(&report, &config.output_path));
            }
            ExitCode::SUCCESS
        }
        // Missing input was already logged; nothing to do.
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("report generation failed: {e}");
            ExitCode::FAILURE
        }
    }
}
