//! Host documents: prose files containing snippet directives

pub mod clean;
pub mod directive;
mod expander;

pub use clean::clean;
pub use directive::Directive;
pub use expander::{query_documents, Expander, RenderOptions, Rendered};

use crate::domain::suggest::Suggester;
use crate::domain::tags::{TagQuery, TaggedDocument};
use crate::domain::{Diagnostics, Revision};
use crate::error::{Result, SnipperError};
use crate::infrastructure::{files, SourceRepository};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostDocument {
    path: PathBuf,
    contents: String,
}

impl HostDocument {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        HostDocument {
            path: path.into(),
            contents: contents.into(),
        }
    }

    pub fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| SnipperError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(path, contents))
    }

    /// Every host document under `root` with one of `extensions`.
    pub fn find_all(root: &Path, extensions: &[String]) -> Result<Vec<Self>> {
        files::find_with_extensions(root, extensions)?
            .iter()
            .map(|path| Self::read(path))
            .collect()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// File name without directories, used to prefix extracted snippets.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Snippet queries in document order, each with the revision active at
    /// its position.
    pub fn snippets(&self) -> Vec<TagQuery> {
        let mut revision = Revision::WorkingCopy;
        let mut queries = Vec::new();

        for line in clean(&self.contents).split('\n') {
            match Directive::parse(line) {
                Some(Directive::TagSwitch(next)) => revision = next,
                Some(Directive::Snippet(raw)) => {
                    queries.push(TagQuery::parse(raw, revision.clone()))
                }
                _ => {}
            }
        }

        queries
    }

    /// Every tag named by a snippet in this document.
    pub fn tags_used(&self) -> BTreeSet<String> {
        self.snippets()
            .iter()
            .flat_map(|query| query.tags_named().map(str::to_string).collect::<Vec<_>>())
            .collect()
    }

    /// Expand (or only clean) this document against `documents`.
    pub fn render(
        &self,
        documents: &mut [TaggedDocument],
        repository: &dyn SourceRepository,
        options: &RenderOptions,
        suggester: &dyn Suggester,
        diagnostics: &mut Diagnostics,
    ) -> Result<Rendered> {
        Expander::new(
            &self.path,
            documents,
            repository,
            options,
            suggester,
            diagnostics,
        )
        .render(&self.contents)
    }
}

/// Combined text of `query` across `documents`, empty when nothing matched.
pub fn render_snippet(
    query: &TagQuery,
    documents: &mut [TaggedDocument],
    diagnostics: &mut Diagnostics,
) -> Result<String> {
    Ok(query_documents(documents, query, diagnostics)?
        .map(|lines| lines.join("\n"))
        .unwrap_or_default())
}
