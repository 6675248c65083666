//! One tracker run: gather, merge into history, persist.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::store::TrackingStore;
use super::{format_timestamp, Analysis, TrackingEntry};
use crate::config::TrackerConfig;
use crate::context::ServiceContext;
use crate::error::TrackerError;
use crate::revision;
use crate::scan::directory::scan_directory;
use crate::scan::usage::find_usages;

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Tracking file that was written.
    pub tracking_file: PathBuf,
    /// Entries retained after the append.
    pub total_entries: usize,
    /// Source files found in the common directory.
    pub common_files: usize,
    /// Files outside the common directory importing from it.
    pub files_using_common: usize,
    /// Files changed in the common directory since the reference revision.
    pub changed_files: usize,
    /// Whether the append pushed an old entry out of the history.
    pub evicted_oldest: bool,
    /// Warnings absorbed while gathering and loading.
    pub diagnostics: Vec<String>,
}

/// Scans `config.common_dir` under `root` and appends the result to the
/// tracking file.
///
/// Git, scanning, and loading problems are logged and carried in
/// [`UpdateOutcome::diagnostics`]; the run still writes a document.
///
/// # Errors
///
/// Returns an error only if the document cannot be serialized or written.
pub fn update(
    ctx: &ServiceContext,
    root: &Path,
    config: &TrackerConfig,
) -> Result<UpdateOutcome, TrackerError> {
    info!(common_dir = %config.common_dir.display(), "analyzing common directory");
    info!(tracking_file = %config.tracking_file.display(), "updating tracking file");

    let mut diagnostics = Vec::new();
    let commit_info = revision::current_commit_info(ctx.git.as_ref()).drain_into(&mut diagnostics);
    let changed_files =
        revision::changed_files(ctx.git.as_ref(), &config.common_dir, &config.since_ref)
        .drain_into(&mut diagnostics);
    let common_files = scan_directory(ctx, root, &config.common_dir, &config.extensions)
        .drain_into(&mut diagnostics);
    let usages =
        find_usages(ctx, root, &config.common_dir, &config.extensions).drain_into(&mut diagnostics);

    let store = TrackingStore::new(ctx, &root.join(&config.tracking_file));
    let mut document = store.load().drain_into(&mut diagnostics);

    for diagnostic in &diagnostics {
        warn!("{diagnostic}");
    }

    let entry = TrackingEntry {
        timestamp: format_timestamp(ctx.clock.now()),
        commit_info,
        analysis: Analysis::new(
            config.common_dir.to_string_lossy().into_owned(),
            changed_files,
            common_files,
            usages,
        ),
    };
    let evicted = document.record(entry, ctx.clock.now());
    store.save(&document)?;

    let summary = &document.summary;
    Ok(UpdateOutcome {
        tracking_file: store.path().to_path_buf(),
        total_entries: summary.total_tracking_entries,
        common_files: summary.current_common_files,
        files_using_common: summary.current_usage_count,
        changed_files: document
            .tracking_history
            .latest()
            .map_or(0, |entry| entry.analysis.changed_files.len()),
        evicted_oldest: evicted.is_some(),
        diagnostics,
    })
}
