//! Live git adapter using `git` CLI commands.

use std::path::Path;
use std::process::Command;

use crate::ports::git::{GitRepo, RevisionInfo};
use crate::ports::PortError;

/// Live git adapter that shells out to the `git` CLI in the current directory.
pub struct LiveGitRepo;

/// Runs `git <args>` and returns its stdout, failing on a non-zero exit.
fn run_git(args: &[&str]) -> Result<String, PortError> {
    let output = Command::new("git").args(args).output()?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("git {} failed: {}", args.join(" "), stderr.trim()).into());
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

impl GitRepo for LiveGitRepo {
    fn current_revision_info(&self) -> Result<RevisionInfo, PortError> {
        let hash = run_git(&["rev-parse", "HEAD"])?.trim().to_string();
        let author = run_git(&["log", "-1", "--format=%an"])?.trim().to_string();
        let date = run_git(&["log", "-1", "--format=%ci"])?.trim().to_string();
        Ok(RevisionInfo { hash, author, date })
    }

    fn changed_paths(&self, dir: &Path, since: &str) -> Result<Vec<String>, PortError> {
        let dir = dir.to_string_lossy();
        let stdout = run_git(&["diff", "--name-only", since, "HEAD", "--", &dir])?;
        Ok(stdout.lines().map(str::trim).filter(|l| !l.is_empty()).map(String::from).collect())
    }
}
