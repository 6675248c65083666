//! Binary entrypoint for the `common-tracker` CLI.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // A missing .env is the normal case.
    let _ = dotenvy::dotenv();
    init_logging();

    // Recording is handled in commands::dispatch via COMMON_TRACKER_RECORD=<dir>.
    match common_tracker::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err.trim_end());
            ExitCode::from(1)
        }
    }
}

/// Logs go to stderr so stdout carries only the run report.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
