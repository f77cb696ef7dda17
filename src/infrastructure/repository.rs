//! Access to the tagged source tree, at the working copy or at any revision

use crate::domain::{Diagnostic, Diagnostics, Revision};
use crate::error::{Result, SnipperError};
use crate::infrastructure::files;
use std::cell::Cell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Abstract source tree that can be read at any revision
pub trait SourceRepository {
    /// Root of the working tree
    fn working_dir(&self) -> &Path;

    /// Content of `path` (relative to the root, `/`-separated) at `revision`.
    ///
    /// Returns `Ok(None)` when the file does not exist at that revision.
    fn content(&self, path: &str, revision: &Revision) -> Result<Option<String>>;

    /// Relative paths of working-copy files with one of the given extensions,
    /// in a stable order.
    fn files_with_extensions(&self, extensions: &[String]) -> Result<Vec<String>>;

    /// Working-copy content of the first file named `name`, searched anywhere
    /// under the root.
    fn find_by_name(&self, name: &str) -> Result<Option<String>>;
}

/// Git checkout read through the `git` command line tool.
///
/// The working copy is read straight from disk. Named revisions are read with
/// `git show <rev>:./<path>`. A directory outside any git checkout still works
/// for the working copy; every named revision is then absent.
#[derive(Debug, Clone)]
pub struct GitRepository {
    root: PathBuf,
    versioned: bool,
}

impl GitRepository {
    /// Open the tree rooted at `root`.
    pub fn open(root: &Path, diagnostics: &mut Diagnostics) -> Result<Self> {
        if !root.exists() {
            return Err(SnipperError::DirectoryNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(SnipperError::NotADirectory(root.to_path_buf()));
        }

        let versioned = Self::is_inside_work_tree(root);
        if !versioned {
            diagnostics.push(Diagnostic::NotVersioned {
                path: root.to_path_buf(),
            });
        }

        Ok(GitRepository {
            root: root.to_path_buf(),
            versioned,
        })
    }

    pub fn is_versioned(&self) -> bool {
        self.versioned
    }

    fn is_inside_work_tree(root: &Path) -> bool {
        Command::new("git")
            .arg("rev-parse")
            .arg("--is-inside-work-tree")
            .current_dir(root)
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    fn show(&self, path: &str, revision: &str) -> Result<Option<String>> {
        let output = Command::new("git")
            .arg("show")
            .arg(format!("{}:./{}", revision, path))
            .current_dir(&self.root)
            .output()
            .map_err(|e| SnipperError::Git(format!("failed to execute git show: {}", e)))?;

        if !output.status.success() {
            // Unknown revision, or the path did not exist at that revision.
            tracing::debug!(
                "git show {}:{} failed: {}",
                revision,
                path,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Ok(None);
        }

        Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()))
    }
}

impl SourceRepository for GitRepository {
    fn working_dir(&self) -> &Path {
        &self.root
    }

    fn content(&self, path: &str, revision: &Revision) -> Result<Option<String>> {
        match revision {
            Revision::WorkingCopy => files::read_optional(&self.root.join(path)),
            Revision::Named(_) if !self.versioned => Ok(None),
            Revision::Named(name) => self.show(path, name),
        }
    }

    fn files_with_extensions(&self, extensions: &[String]) -> Result<Vec<String>> {
        let found = files::find_with_extensions(&self.root, extensions)?;

        Ok(found
            .iter()
            .filter_map(|path| path.strip_prefix(&self.root).ok())
            .filter_map(files::normalize_relative_path)
            .collect())
    }

    fn find_by_name(&self, name: &str) -> Result<Option<String>> {
        match files::find_by_name(&self.root, name) {
            Some(path) => fs::read_to_string(&path)
                .map(Some)
                .map_err(|source| SnipperError::Read { path, source }),
            None => Ok(None),
        }
    }
}

/// In-memory tree, for tests and embedding.
///
/// Counts how many times file content was requested so callers can check
/// caching behaviour.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    root: PathBuf,
    files: BTreeMap<(String, Revision), String>,
    fetches: Cell<usize>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file to the working copy.
    pub fn with_working_file(self, path: &str, content: &str) -> Self {
        self.with_file(Revision::WorkingCopy, path, content)
    }

    /// Add a file as committed at `revision`.
    pub fn with_committed_file(self, revision: &str, path: &str, content: &str) -> Self {
        self.with_file(Revision::Named(revision.to_string()), path, content)
    }

    fn with_file(mut self, revision: Revision, path: &str, content: &str) -> Self {
        self.files
            .insert((path.to_string(), revision), content.to_string());
        self
    }

    /// Number of `content` calls served so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.get()
    }

    fn working_paths(&self) -> impl Iterator<Item = &String> {
        self.files
            .keys()
            .filter(|(_, revision)| revision.is_working_copy())
            .map(|(path, _)| path)
    }
}

impl SourceRepository for MemoryRepository {
    fn working_dir(&self) -> &Path {
        &self.root
    }

    fn content(&self, path: &str, revision: &Revision) -> Result<Option<String>> {
        self.fetches.set(self.fetches.get() + 1);
        Ok(self
            .files
            .get(&(path.to_string(), revision.clone()))
            .cloned())
    }

    fn files_with_extensions(&self, extensions: &[String]) -> Result<Vec<String>> {
        Ok(self
            .working_paths()
            .filter(|path| files::has_extension(Path::new(path), extensions))
            .cloned()
            .collect())
    }

    fn find_by_name(&self, name: &str) -> Result<Option<String>> {
        let found = self
            .working_paths()
            .find(|path| Path::new(path).file_name().and_then(|n| n.to_str()) == Some(name));

        Ok(found.and_then(|path| {
            self.files
                .get(&(path.clone(), Revision::WorkingCopy))
                .cloned()
        }))
    }
}
