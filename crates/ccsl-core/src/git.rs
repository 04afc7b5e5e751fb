//! Best-effort git status probe.
//!
//! The status line shows the current branch and a dirty indicator. Both come
//! from short-lived `git` invocations bounded by a timeout; a missing git
//! binary, a non-repository directory, or a slow filesystem all degrade to
//! the neutral default rather than delaying or failing the render.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// Budget for each git invocation.
const GIT_TIMEOUT: Duration = Duration::from_secs(2);

/// Source-control status for the session's working directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitStatus {
    /// Current branch name, `None` outside a repository
    pub branch: Option<String>,

    /// Number of modified/staged files per `git status --porcelain`
    pub modified_count: usize,
}

/// Probe git status for a working directory.
///
/// Never fails: every error path returns the neutral default.
pub async fn probe(cwd: &str) -> GitStatus {
    if !Path::new(cwd).is_dir() {
        return GitStatus::default();
    }

    let Some(branch) = run_git(cwd, &["rev-parse", "--abbrev-ref", "HEAD"]).await else {
        // Not a repository, git missing, or timed out
        return GitStatus::default();
    };

    let modified_count = match run_git(cwd, &["status", "--porcelain"]).await {
        Some(output) => output.lines().filter(|line| !line.trim().is_empty()).count(),
        None => 0,
    };

    GitStatus {
        branch: Some(branch.trim().to_string()),
        modified_count,
    }
}

/// Run one git command under the timeout, returning stdout on success.
async fn run_git(cwd: &str, args: &[&str]) -> Option<String> {
    let child = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .output();

    match timeout(GIT_TIMEOUT, child).await {
        Ok(Ok(output)) if output.status.success() => {
            Some(String::from_utf8_lossy(&output.stdout).into_owned())
        }
        Ok(Ok(output)) => {
            debug!(args = ?args, code = ?output.status.code(), "git exited non-zero");
            None
        }
        Ok(Err(e)) => {
            debug!(args = ?args, error = %e, "git failed to run");
            None
        }
        Err(_) => {
            debug!(args = ?args, "git timed out");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_non_repository_is_neutral() {
        let dir = tempfile::tempdir().unwrap();
        let status = probe(dir.path().to_str().unwrap()).await;
        assert_eq!(status, GitStatus::default());
    }

    #[tokio::test]
    async fn test_missing_directory_is_neutral() {
        let status = probe("/no/such/directory").await;
        assert_eq!(status, GitStatus::default());
    }
}
