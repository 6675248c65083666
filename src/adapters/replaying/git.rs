//! Replaying adapter for the `GitRepo` port.

use std::path::Path;
use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::git::{GitRepo, RevisionInfo};
use crate::ports::PortError;

/// Replays recorded git queries from a cassette.
pub struct ReplayingGitRepo {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingGitRepo {
    /// Creates a new replaying git repo from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl GitRepo for ReplayingGitRepo {
    fn current_revision_info(&self) -> Result<RevisionInfo, PortError> {
        let output = next_output(&self.replayer, "git", "current_revision_info");
        replay_result(&output, "git::current_revision_info")
    }

    fn changed_paths(&self, _dir: &Path, _since: &str) -> Result<Vec<String>, PortError> {
        let output = next_output(&self.replayer, "git", "changed_paths");
        replay_result(&output, "git::changed_paths")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::replaying::test_support::replayer;
    use serde_json::json;

    #[test]
    fn replays_revision_info() {
        let git = ReplayingGitRepo::new(replayer(&[(
            "git",
            "current_revision_info",
            json!({"ok": {
                "hash": "abc123",
                "author": "Dana",
                "date": "2024-05-01 10:00:00 +0200",
            }}),
        )]));

        let info = git.current_revision_info().unwrap();
        assert_eq!(info.hash, "abc123");
        assert_eq!(info.author, "Dana");
    }

    #[test]
    fn replays_diff_failure() {
        let git = ReplayingGitRepo::new(replayer(&[(
            "git",
            "changed_paths",
            json!({"err": "fatal: ambiguous argument 'HEAD~1'"}),
        )]));

        let err = git.changed_paths(Path::new("common"), "HEAD~1").unwrap_err();
        assert!(err.to_string().contains("ambiguous argument"));
    }
}
