//! Git repository port for version-control queries.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::PortError;

/// Identity of the HEAD commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionInfo {
    /// Full commit hash.
    pub hash: String,
    /// Author name.
    pub author: String,
    /// Commit date as printed by `git log --format=%ci`.
    pub date: String,
}

/// Provides read access to the repository the tracker runs in.
///
/// Abstracting git access allows deterministic replay and testing
/// without requiring a real repository.
pub trait GitRepo: Send + Sync {
    /// Returns hash, author, and date of the HEAD commit.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository has no commits, is missing, or the
    /// `git` executable cannot be run.
    fn current_revision_info(&self) -> Result<RevisionInfo, PortError>;

    /// Lists paths under `dir` that differ between `since` and `HEAD`.
    ///
    /// # Errors
    ///
    /// Returns an error if the diff cannot be computed (unknown revision,
    /// shallow clone, missing repository).
    fn changed_paths(&self, dir: &Path, since: &str) -> Result<Vec<String>, PortError>;
}
