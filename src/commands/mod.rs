//! Command dispatch.

pub mod track;

use std::path::Path;

use tracing::info;

use crate::cassette::session::RecordingSession;
use crate::cli::Cli;
use crate::config::{record_dir_from_env, TrackerConfig};
use crate::context::ServiceContext;
use crate::error::TrackerError;

/// Run the tracker for parsed arguments from the current directory.
///
/// When `COMMON_TRACKER_RECORD` is set to a directory path, every port
/// interaction is recorded to per-port cassette files under it.
///
/// # Errors
///
/// Returns an error string if the run fails or a recording cannot be saved.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let root = std::env::current_dir()
        .map_err(|e| format!("failed to get current directory: {e}"))?;
    let config = TrackerConfig::from_cli(cli);

    let (ctx, session) = match record_dir_from_env() {
        Some(dir) => {
            let (ctx, session) = ServiceContext::recording_at(dir)
                .map_err(|e| TrackerError::Recording(e).to_string())?;
            (ctx, Some(session))
        }
        None => (ServiceContext::live(), None),
    };

    let result = track::run_with_context(&ctx, &root, &config);

    // Finish recording after the run completes, even on error.
    if let Some(session) = session {
        // Drop the context first to release the recorders.
        drop(ctx);
        finish_recording(session)?;
    }

    result.map(drop).map_err(|e| e.to_string())
}

fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish().map_err(|e| TrackerError::Recording(e).to_string())?;
    info!(dir = %output_dir.display(), "recording saved");
    eprintln!("Recording saved to: {}", display_relative(&output_dir));
    Ok(())
}

fn display_relative(path: &Path) -> String {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(|p| p.display().to_string()))
        .unwrap_or_else(|| path.display().to_string())
}
