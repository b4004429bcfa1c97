//! Recursive discovery of document files

use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Directory {0} does not exist")]
    DirectoryNotFound(PathBuf),

    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),
}

/// Checks that `root` exists and is a directory
pub fn validate_root(root: &Path) -> Result<(), DiscoveryError> {
    if !root.exists() {
        return Err(DiscoveryError::DirectoryNotFound(root.to_path_buf()));
    }

    if !root.is_dir() {
        return Err(DiscoveryError::NotADirectory(root.to_path_buf()));
    }

    Ok(())
}

/// Finds every regular file under `root` with the given extension.
///
/// Symlinked directories are not descended into; symlinks to regular files
/// are included. The result is sorted so repeated runs report files in the
/// same order.
pub fn find_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
    validate_root(root)?;

    let extension = extension.trim_start_matches('.');
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable entry");
                continue;
            }
        };

        let file_type = entry.file_type();
        let regular = file_type.is_file() || (file_type.is_symlink() && entry.path().is_file());
        if !regular {
            continue;
        }

        let path = entry.path();
        if path.extension().is_some_and(|e| e == extension) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}
