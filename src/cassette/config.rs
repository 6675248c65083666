//! Per-port cassette configuration for composable replay.

use std::path::{Path, PathBuf};

use super::format::Cassette;
use super::replayer::CassetteReplayer;

/// Per-port cassette file paths. Ports without a cassette path panic if they
/// are called during replay.
#[derive(Debug, Clone, Default)]
pub struct CassetteConfig {
    /// Path to the clock port cassette file.
    pub clock: Option<PathBuf>,
    /// Path to the filesystem port cassette file.
    pub fs: Option<PathBuf>,
    /// Path to the git port cassette file.
    pub git: Option<PathBuf>,
}

/// Per-port replayers, each with its own interaction stream.
pub struct PortReplayers {
    /// Replayer for the clock port.
    pub clock: Option<CassetteReplayer>,
    /// Replayer for the filesystem port.
    pub fs: Option<CassetteReplayer>,
    /// Replayer for the git port.
    pub git: Option<CassetteReplayer>,
}

impl CassetteConfig {
    /// Returns a config where no port has a cassette.
    #[must_use]
    pub fn panic_on_unspecified() -> Self {
        Self::default()
    }

    /// Points every port at the files a [`RecordingSession`] wrote into `dir`.
    ///
    /// [`RecordingSession`]: super::session::RecordingSession
    #[must_use]
    pub fn from_session_dir(dir: &Path) -> Self {
        let port_file = |port: &str| {
            let path = dir.join(format!("{port}.cassette.yaml"));
            path.exists().then_some(path)
        };
        Self { clock: port_file("clock"), fs: port_file("fs"), git: port_file("git") }
    }

    /// Load all configured cassette files and create replayers.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn load_all(&self) -> Result<PortReplayers, String> {
        let load = |path: &Option<PathBuf>| -> Result<Option<CassetteReplayer>, String> {
            path.as_deref()
                .map(|p| Cassette::load(p).map(|c| CassetteReplayer::new(&c)))
                .transpose()
        };
        Ok(PortReplayers { clock: load(&self.clock)?, fs: load(&self.fs)?, git: load(&self.git)? })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Interaction;
    use chrono::Utc;
    use serde_json::json;

    fn write_cassette(path: &Path, port: &str, method: &str, output: serde_json::Value) {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions: vec![Interaction {
                seq: 0,
                port: port.into(),
                method: method.into(),
                input: json!({}),
                output,
            }],
        };
        std::fs::write(path, serde_yaml::to_string(&cassette).unwrap()).unwrap();
    }

    #[test]
    fn load_all_only_loads_configured_ports() {
        let dir = tempfile::tempdir().unwrap();
        let git_path = dir.path().join("git.cassette.yaml");
        write_cassette(&git_path, "git", "changed_paths", json!({"ok": ["common/a.py"]}));

        let config = CassetteConfig { git: Some(git_path), ..CassetteConfig::default() };
        let mut replayers = config.load_all().unwrap();

        let git = replayers.git.as_mut().unwrap();
        assert_eq!(git.next_interaction("git", "changed_paths").output["ok"][0], "common/a.py");
        assert!(replayers.clock.is_none());
        assert!(replayers.fs.is_none());
    }

    #[test]
    fn load_all_fails_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config =
            CassetteConfig { fs: Some(dir.path().join("nope.yaml")), ..CassetteConfig::default() };
        assert!(config.load_all().is_err());
    }

    #[test]
    fn from_session_dir_picks_up_existing_port_files() {
        let dir = tempfile::tempdir().unwrap();
        write_cassette(&dir.path().join("clock.cassette.yaml"), "clock", "now", json!(""));
        write_cassette(&dir.path().join("fs.cassette.yaml"), "fs", "exists", json!(true));

        let config = CassetteConfig::from_session_dir(dir.path());
        assert!(config.clock.is_some());
        assert!(config.fs.is_some());
        assert!(config.git.is_none());
    }
}
