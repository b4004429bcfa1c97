//! Reading and writing document files

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::Document;

/// Reads and parses a document
pub fn read_document(path: &Path) -> Result<Document> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    Document::parse(&content).with_context(|| format!("Failed to parse frontmatter: {}", path.display()))
}

/// Renders and writes a document over an existing file.
///
/// Symlinks are written through to their target. The file keeps its
/// permissions, and read-only files are refused. Files with other hard
/// links are rewritten in place; everything else goes through a temp file
/// and rename.
pub fn write_document(path: &Path, document: &Document) -> Result<()> {
    let content = document.render().context("Failed to serialize frontmatter")?;

    let target = fs::canonicalize(path)
        .with_context(|| format!("Failed to resolve file: {}", path.display()))?;
    let metadata = fs::metadata(&target)
        .with_context(|| format!("Failed to read metadata: {}", target.display()))?;

    if metadata.permissions().readonly() {
        anyhow::bail!("File is read-only: {}", path.display());
    }

    if has_other_links(&metadata) {
        return fs::write(&target, &content)
            .with_context(|| format!("Failed to write file: {}", target.display()));
    }

    let temp_path = temp_path_for(&target);

    fs::write(&temp_path, &content)
        .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;

    let replaced = fs::set_permissions(&temp_path, metadata.permissions())
        .with_context(|| format!("Failed to set permissions: {}", temp_path.display()))
        .and_then(|()| {
            fs::rename(&temp_path, &target).with_context(|| {
                format!(
                    "Failed to rename {} to {}",
                    temp_path.display(),
                    target.display()
                )
            })
        });

    if replaced.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    replaced
}

#[cfg(unix)]
fn has_other_links(metadata: &fs::Metadata) -> bool {
    use std::os::unix::fs::MetadataExt;
    metadata.nlink() > 1
}

#[cfg(not(unix))]
fn has_other_links(_metadata: &fs::Metadata) -> bool {
    false
}

/// `post.md` -> `post.md.tmp`, next to the original
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
