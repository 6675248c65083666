//! The tracking run and its console report.

use std::path::Path;

use crate::config::TrackerConfig;
use crate::context::ServiceContext;
use crate::error::TrackerError;
use crate::tracking::update::{update, UpdateOutcome};

/// Checks the repository precondition, updates the tracking file, and prints
/// a summary to stdout.
///
/// # Errors
///
/// Returns [`TrackerError::NotRepositoryRoot`] before any scanning if `root`
/// has no `.git`, or the write error from the update.
pub fn run_with_context(
    ctx: &ServiceContext,
    root: &Path,
    config: &TrackerConfig,
) -> Result<UpdateOutcome, TrackerError> {
    if !ctx.fs.exists(&root.join(".git")) {
        return Err(TrackerError::NotRepositoryRoot(root.to_path_buf()));
    }

    let outcome = update(ctx, root, config)?;
    print!("{}", render_report(config, &outcome));
    Ok(outcome)
}

/// The lines printed after a successful run.
#[must_use]
pub fn render_report(config: &TrackerConfig, outcome: &UpdateOutcome) -> String {
    let mut report = format!(
        "Successfully updated tracking file: {}\n\
         Found {} files in common directory\n\
         Found {} files using common code\n",
        config.tracking_file.display(),
        outcome.common_files,
        outcome.files_using_common,
    );
    if outcome.changed_files > 0 {
        report.push_str(&format!(
            "Detected {} changed files in common directory\n",
            outcome.changed_files
        ));
    }
    report
}
