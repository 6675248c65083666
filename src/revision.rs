//! Git metadata for tracking entries.
//!
//! Both queries absorb every failure: a missing repository, a missing `git`
//! executable, or a shallow clone without `HEAD~1` turns into sentinel values
//! and a diagnostic instead of aborting the run.

use std::path::Path;

use tracing::debug;

use crate::gather::Gathered;
use crate::ports::GitRepo;
use crate::tracking::CommitInfo;

/// Reference revision used when none is configured.
pub const DEFAULT_SINCE_REF: &str = "HEAD~1";

/// Hash, author, and date of `HEAD`, or all `"unknown"` if git cannot say.
pub fn current_commit_info(git: &dyn GitRepo) -> Gathered<CommitInfo> {
    match git.current_revision_info() {
        Ok(info) => {
            debug!(hash = %info.hash, "read HEAD revision");
            Gathered::ok(CommitInfo { hash: info.hash, author: info.author, date: info.date })
        }
        Err(e) => Gathered::degraded(
            CommitInfo::unknown(),
            format!("Could not read current commit info: {e}"),
        ),
    }
}

/// Paths under `target_dir` that changed between `since_ref` and `HEAD`.
pub fn changed_files(
    git: &dyn GitRepo,
    target_dir: &Path,
    since_ref: &str,
) -> Gathered<Vec<String>> {
    match git.changed_paths(target_dir, since_ref) {
        Ok(paths) => {
            debug!(count = paths.len(), since_ref, "listed changed files");
            Gathered::ok(paths)
        }
        Err(e) => Gathered::degraded(
            Vec::new(),
            format!("Could not get git diff for {} since {since_ref}: {e}", target_dir.display()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeGit;

    #[test]
    fn commit_info_falls_back_to_unknown() {
        let info = current_commit_info(&FakeGit::broken());
        assert_eq!(info.value, CommitInfo::unknown());
        assert_eq!(info.value.hash, "unknown");
        assert_eq!(info.diagnostics.len(), 1);
    }

    #[test]
    fn commit_info_passes_through_revision() {
        let info = current_commit_info(&FakeGit::at("abc123"));
        assert!(info.is_clean());
        assert_eq!(info.value.hash, "abc123");
        assert_eq!(info.value.author, "Test Author");
    }

    #[test]
    fn changed_files_failure_yields_empty_list_and_warning() {
        let changed = changed_files(&FakeGit::broken(), Path::new("common"), DEFAULT_SINCE_REF);
        assert!(changed.value.is_empty());
        assert!(changed.diagnostics[0].contains("Could not get git diff for common"));
    }

    #[test]
    fn changed_files_returns_diff_paths() {
        let git = FakeGit::at("abc123").with_changes(&["common/util.py", "common/io.py"]);
        let changed = changed_files(&git, Path::new("common"), "HEAD~5");
        assert_eq!(changed.value, vec!["common/util.py", "common/io.py"]);
        assert_eq!(git.last_since(), Some("HEAD~5".to_string()));
    }
}
