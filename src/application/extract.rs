//! Snippet extraction use case
//!
//! Writes the text of every snippet to its own file, for tools that want
//! the code without the surrounding prose.

use super::Workspace;
use crate::domain::host::render_snippet;
use crate::domain::Diagnostics;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

pub struct ExtractService;

impl ExtractService {
    /// Extract into `dir`, returning the files written.
    ///
    /// A `dir` that is not an existing directory is logged and skipped.
    pub fn execute(
        workspace: &mut Workspace,
        dir: &Path,
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            tracing::error!("{} is not a directory.", dir.display());
            return Ok(Vec::new());
        }

        let use_file_prefix = workspace.hosts.len() > 1;
        let mut written = Vec::new();

        for host in &workspace.hosts {
            for (index, query) in host.snippets().iter().enumerate() {
                let mut file_name = format!("{}-{}", index, query.as_filename());
                if use_file_prefix {
                    file_name = format!("{}_{}", host.file_name(), file_name);
                }

                let text = render_snippet(query, &mut workspace.documents, diagnostics)?;
                let path = dir.join(file_name);
                fs::write(&path, text)?;

                tracing::debug!("Extracted {}", path.display());
                written.push(path);
            }
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HostDocument;
    use crate::infrastructure::{MemoryRepository, SourceRepository};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn workspace(hosts: Vec<HostDocument>) -> Workspace {
        let repository: Arc<dyn SourceRepository> = Arc::new(
            MemoryRepository::new()
                .with_working_file("A.swift", "// BEGIN a\n    let a = 1\n// END a\n")
                .with_committed_file("v1", "A.swift", "// BEGIN a\nlet a = 0\n// END a\n"),
        );
        Workspace::new(repository, hosts, &["swift".to_string()], &mut Diagnostics::new()).unwrap()
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_single_host_has_no_prefix() {
        let temp = TempDir::new().unwrap();
        let mut workspace = workspace(vec![HostDocument::new(
            "book/ch1.txt",
            "// snip: a\n// tag: v1\n// snip: a\n// snip: missing\n",
        )]);

        let written =
            ExtractService::execute(&mut workspace, temp.path(), &mut Diagnostics::new()).unwrap();

        assert_eq!(names(&written), vec!["0-a", "1-v1_a", "2-v1_missing"]);
        assert_eq!(fs::read_to_string(&written[0]).unwrap(), "let a = 1");
        assert_eq!(fs::read_to_string(&written[1]).unwrap(), "let a = 0");
        assert_eq!(fs::read_to_string(&written[2]).unwrap(), "");
    }

    #[test]
    fn test_multiple_hosts_are_prefixed() {
        let temp = TempDir::new().unwrap();
        let mut workspace = workspace(vec![
            HostDocument::new("ch1.txt", "// snip: a\n"),
            HostDocument::new("ch2.txt", "// snip: a except b\n"),
        ]);

        let written =
            ExtractService::execute(&mut workspace, temp.path(), &mut Diagnostics::new()).unwrap();

        assert_eq!(names(&written), vec!["ch1.txt_0-a", "ch2.txt_0-a_except_b"]);
    }

    #[test]
    fn test_missing_directory_is_skipped() {
        let temp = TempDir::new().unwrap();
        let mut workspace = workspace(vec![HostDocument::new("ch1.txt", "// snip: a\n")]);

        let written = ExtractService::execute(
            &mut workspace,
            &temp.path().join("nope"),
            &mut Diagnostics::new(),
        )
        .unwrap();

        assert!(written.is_empty());
        assert!(!temp.path().join("nope").exists());
    }
}
