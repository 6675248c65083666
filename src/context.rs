//! Service context bundling all port trait objects.

use std::path::{Path, PathBuf};

use crate::adapters::live::clock::LiveClock;
use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::git::LiveGitRepo;
use crate::adapters::recording::{RecordingClock, RecordingFileSystem, RecordingGitRepo};
use crate::adapters::replaying::{ReplayingClock, ReplayingFileSystem, ReplayingGitRepo};
use crate::cassette::config::CassetteConfig;
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::git::{GitRepo, RevisionInfo};
use crate::ports::{FileMeta, PortError};

/// Bundles all port trait objects into a single context.
///
/// Every gathering step and the tracking store reach the outside world only
/// through these fields. Constructors wire up live, recording, or replaying
/// adapters.
pub struct ServiceContext {
    /// Clock for timestamps.
    pub clock: Box<dyn Clock>,
    /// Filesystem for walking, reading, and writing.
    pub fs: Box<dyn FileSystem>,
    /// Git repository for revision metadata and diffs.
    pub git: Box<dyn GitRepo>,
}

impl ServiceContext {
    /// Creates a live context with real adapters.
    #[must_use]
    pub fn live() -> Self {
        Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            git: Box::new(LiveGitRepo),
        }
    }

    /// Creates a context whose live adapters are recorded into per-port
    /// cassettes under `base`.
    ///
    /// The returned session must be finished after the context is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the session directory cannot be created.
    pub fn recording_at(base: PathBuf) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::new(&base)?;
        let ctx = Self {
            clock: Box::new(RecordingClock::new(Box::new(LiveClock), session.clock.clone())),
            fs: Box::new(RecordingFileSystem::new(Box::new(LiveFileSystem), session.fs.clone())),
            git: Box::new(RecordingGitRepo::new(Box::new(LiveGitRepo), session.git.clone())),
        };
        Ok((ctx, session))
    }

    /// Creates a replaying context from a single cassette holding every port.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let cassette = Cassette::load(path)?;
        // One replayer per port so that each keeps its own queues.
        Ok(Self {
            clock: Box::new(ReplayingClock::new(CassetteReplayer::new(&cassette))),
            fs: Box::new(ReplayingFileSystem::new(CassetteReplayer::new(&cassette))),
            git: Box::new(ReplayingGitRepo::new(CassetteReplayer::new(&cassette))),
        })
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Ports without a configured cassette panic with a clear message when
    /// called.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;
        Ok(Self {
            clock: match replayers.clock {
                Some(r) => Box::new(ReplayingClock::new(r)),
                None => Box::new(PanickingClock),
            },
            fs: match replayers.fs {
                Some(r) => Box::new(ReplayingFileSystem::new(r)),
                None => Box::new(PanickingFileSystem),
            },
            git: match replayers.git {
                Some(r) => Box::new(ReplayingGitRepo::new(r)),
                None => Box::new(PanickingGitRepo),
            },
        })
    }
}

// --- Panicking adapters for unconfigured ports ---

const NOT_CONFIGURED: &str = "port not configured in CassetteConfig - no cassette loaded";

struct PanickingClock;
impl Clock for PanickingClock {
    fn now(&self) -> chrono::DateTime<chrono::Utc> {
        panic!("Clock {NOT_CONFIGURED} for clock");
    }
}

struct PanickingFileSystem;
impl FileSystem for PanickingFileSystem {
    fn read_to_string(&self, _path: &Path) -> Result<String, PortError> {
        panic!("FileSystem {NOT_CONFIGURED} for fs");
    }
    fn write(&self, _path: &Path, _contents: &str) -> Result<(), PortError> {
        panic!("FileSystem {NOT_CONFIGURED} for fs");
    }
    fn exists(&self, _path: &Path) -> bool {
        panic!("FileSystem {NOT_CONFIGURED} for fs");
    }
    fn metadata(&self, _path: &Path) -> Result<FileMeta, PortError> {
        panic!("FileSystem {NOT_CONFIGURED} for fs");
    }
    fn walk_files(&self, _root: &Path, _skip: &[PathBuf]) -> Result<Vec<PathBuf>, PortError> {
        panic!("FileSystem {NOT_CONFIGURED} for fs");
    }
}

struct PanickingGitRepo;
impl GitRepo for PanickingGitRepo {
    fn current_revision_info(&self) -> Result<RevisionInfo, PortError> {
        panic!("GitRepo {NOT_CONFIGURED} for git");
    }
    fn changed_paths(&self, _dir: &Path, _since: &str) -> Result<Vec<String>, PortError> {
        panic!("GitRepo {NOT_CONFIGURED} for git");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::recorder::CassetteRecorder;
    use serde_json::json;

    #[test]
    fn replaying_context_serves_every_port_from_one_cassette() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("full.cassette.yaml");
        let mut recorder = CassetteRecorder::new(&path, "mono", "abc");
        recorder.record("clock", "now", json!({}), json!("2024-06-15T10:30:00Z"));
        recorder.record("fs", "exists", json!({"path": ".git"}), json!(true));
        recorder.record("git", "changed_paths", json!({}), json!({"ok": ["common/a.py"]}));
        recorder.finish().unwrap();

        let ctx = ServiceContext::replaying(&path).unwrap();
        assert_eq!(ctx.clock.now().to_rfc3339(), "2024-06-15T10:30:00+00:00");
        assert!(ctx.fs.exists(Path::new(".git")));
        assert_eq!(
            ctx.git.changed_paths(Path::new("common"), "HEAD~1").unwrap(),
            vec!["common/a.py".to_string()]
        );
    }

    #[test]
    #[should_panic(expected = "not configured in CassetteConfig")]
    fn unconfigured_port_panics_with_clear_message() {
        let ctx = ServiceContext::replaying_from(&CassetteConfig::panic_on_unspecified()).unwrap();
        let _ = ctx.git.current_revision_info();
    }
}
