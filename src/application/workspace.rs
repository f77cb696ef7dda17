//! Discovery of host and tagged documents

use crate::domain::tags::TaggedDocument;
use crate::domain::{Diagnostics, HostDocument};
use crate::error::Result;
use crate::infrastructure::{Config, GitRepository, SourceRepository};
use std::path::Path;
use std::sync::Arc;

/// Everything one run works on.
pub struct Workspace {
    pub repository: Arc<dyn SourceRepository>,
    pub documents: Vec<TaggedDocument>,
    pub hosts: Vec<HostDocument>,
}

impl Workspace {
    /// Discover host documents under `source_dir` and tagged documents under
    /// `code_dir`.
    pub fn open(
        source_dir: &Path,
        code_dir: &Path,
        config: &Config,
        diagnostics: &mut Diagnostics,
    ) -> Result<Self> {
        let repository: Arc<dyn SourceRepository> =
            Arc::new(GitRepository::open(code_dir, diagnostics)?);
        let hosts = HostDocument::find_all(source_dir, &config.source_extensions)?;

        Self::new(repository, hosts, &config.tagged_extensions, diagnostics)
    }

    pub fn new(
        repository: Arc<dyn SourceRepository>,
        hosts: Vec<HostDocument>,
        tagged_extensions: &[String],
        diagnostics: &mut Diagnostics,
    ) -> Result<Self> {
        let documents =
            TaggedDocument::find_all(Arc::clone(&repository), tagged_extensions, diagnostics)?;

        tracing::debug!("Found {} source files:", hosts.len());
        for host in &hosts {
            tracing::debug!(" - {}", host.path().display());
        }
        tracing::debug!("Found {} code files:", documents.len());
        for document in &documents {
            tracing::debug!(" - {}", document.path());
        }

        Ok(Workspace {
            repository,
            documents,
            hosts,
        })
    }
}
