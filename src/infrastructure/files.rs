//! File discovery and writing

use crate::error::{Result, SnipperError};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Walk `root` in file-name order, skipping hidden directories such as `.git`.
fn walk(root: &Path) -> impl Iterator<Item = walkdir::Result<DirEntry>> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            entry
                .file_name()
                .to_str()
                .is_none_or(|name| !name.starts_with('.'))
        })
}

pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted == ext))
}

/// All files under `root` with one of `extensions`.
///
/// An unreadable root is an error; unreadable entries below it are skipped.
pub fn find_with_extensions(root: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(SnipperError::DirectoryNotFound(root.to_path_buf()));
    }
    fs::read_dir(root).map_err(|source| SnipperError::Read {
        path: root.to_path_buf(),
        source,
    })?;

    let mut found = Vec::new();
    for entry in walk(root) {
        let Ok(entry) = entry else {
            continue;
        };
        if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
            found.push(entry.into_path());
        }
    }

    Ok(found)
}

/// First file named `name` anywhere under `root`.
pub fn find_by_name(root: &Path, name: &str) -> Option<PathBuf> {
    walk(root)
        .filter_map(|entry| entry.ok())
        .find(|entry| entry.file_type().is_file() && entry.file_name().to_str() == Some(name))
        .map(DirEntry::into_path)
}

/// Join path components with `/` regardless of platform.
pub fn normalize_relative_path(path: &Path) -> Option<String> {
    let parts: Vec<&str> = path
        .iter()
        .map(|part| part.to_str())
        .collect::<Option<_>>()?;
    Some(parts.join("/"))
}

/// Read a file, treating a missing file as `None`.
///
/// Invalid UTF-8 is replaced rather than rejected, the same way `git show`
/// output is decoded.
pub fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(SnipperError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Write using a best-effort atomic replace:
/// write to a temp file in the same directory, then rename into place.
///
/// On Windows, `rename` does not overwrite existing files, so we remove the destination first.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_name = format!(
        "{}.snipper-tmp-{}",
        path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("document"),
        std::process::id()
    );
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, content)?;

    if cfg!(windows) && path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&tmp_path, path)?;
    Ok(())
}
