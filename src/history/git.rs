//! Git-backed history lookups

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

use super::HistorySource;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{0} is not in a git repository")]
    NotInRepository(PathBuf),

    #[error("Failed to run git: {0}")]
    GitUnavailable(#[from] std::io::Error),
}

/// Reads file history by shelling out to `git`
#[derive(Debug, Default, Clone)]
pub struct GitHistory;

impl GitHistory {
    pub fn new() -> Self {
        Self
    }

    /// Confirms `dir` is inside a git work tree.
    ///
    /// Probes the same way `git` itself locates the repository, so the
    /// directory may be anywhere below the top level.
    pub fn ensure_repository(dir: &Path) -> Result<(), RepositoryError> {
        let output = Command::new("git")
            .args(["rev-parse", "--git-dir"])
            .current_dir(dir)
            .output()?;

        if !output.status.success() {
            tracing::debug!(
                dir = %dir.display(),
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "git rev-parse failed"
            );
            return Err(RepositoryError::NotInRepository(dir.to_path_buf()));
        }

        Ok(())
    }

    /// Returns true if the repository containing `dir` is a shallow clone
    pub fn is_shallow(dir: &Path) -> bool {
        Command::new("git")
            .args(["rev-parse", "--is-shallow-repository"])
            .current_dir(dir)
            .output()
            .map(|out| out.status.success() && String::from_utf8_lossy(&out.stdout).trim() == "true")
            .unwrap_or(false)
    }
}

impl HistorySource for GitHistory {
    fn timestamps(&self, path: &Path) -> Option<Vec<String>> {
        let file_name = path.file_name()?;
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        // %aI: author date, strict ISO 8601
        let output = match Command::new("git")
            .args(["log", "--follow", "--format=%aI", "--"])
            .arg(file_name)
            .current_dir(parent)
            .output()
        {
            Ok(out) => out,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to run git log");
                return None;
            }
        };

        if !output.status.success() {
            tracing::debug!(
                path = %path.display(),
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "git log failed"
            );
            return None;
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let timestamps: Vec<String> = stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        tracing::debug!(path = %path.display(), commits = timestamps.len(), "Read git history");

        if timestamps.is_empty() {
            None
        } else {
            Some(timestamps)
        }
    }
}
