//! In-process fakes shared by unit tests.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};

use crate::adapters::live::filesystem::LiveFileSystem;
use crate::context::ServiceContext;
use crate::ports::{Clock, GitRepo, PortError, RevisionInfo};

/// Git fake that either answers from canned data or fails every query.
pub struct FakeGit {
    head: Option<String>,
    changes: Vec<String>,
    last_since: Mutex<Option<String>>,
}

impl FakeGit {
    pub fn at(hash: &str) -> Self {
        Self { head: Some(hash.to_string()), changes: Vec::new(), last_since: Mutex::new(None) }
    }

    pub fn broken() -> Self {
        Self { head: None, changes: Vec::new(), last_since: Mutex::new(None) }
    }

    pub fn with_changes(mut self, changes: &[&str]) -> Self {
        self.changes = changes.iter().map(ToString::to_string).collect();
        self
    }

    pub fn last_since(&self) -> Option<String> {
        self.last_since.lock().unwrap().clone()
    }
}

impl GitRepo for FakeGit {
    fn current_revision_info(&self) -> Result<RevisionInfo, PortError> {
        match &self.head {
            Some(hash) => Ok(RevisionInfo {
                hash: hash.clone(),
                author: "Test Author".to_string(),
                date: "2024-05-01 10:00:00 +0000".to_string(),
            }),
            None => Err("fatal: not a git repository".into()),
        }
    }

    fn changed_paths(&self, _dir: &Path, since: &str) -> Result<Vec<String>, PortError> {
        *self.last_since.lock().unwrap() = Some(since.to_string());
        match self.head {
            Some(_) => Ok(self.changes.clone()),
            None => Err("fatal: bad revision".into()),
        }
    }
}

/// Clock frozen at a single instant.
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn at(y: i32, mo: u32, d: u32, h: u32) -> Self {
        Self(Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Context over the real disk with a fake git and a frozen clock.
pub fn disk_context(git: FakeGit) -> ServiceContext {
    ServiceContext {
        clock: Box::new(FixedClock::at(2024, 5, 1, 12)),
        fs: Box::new(LiveFileSystem),
        git: Box::new(git),
    }
}

/// Writes `contents` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}
