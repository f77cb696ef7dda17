//! Tagged source documents and their per-revision cache

use super::{evaluate, TagParser, TagQuery, TaggedLine};
use crate::domain::{Diagnostics, Revision};
use crate::error::Result;
use crate::infrastructure::SourceRepository;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// One source file as it was at one revision, already parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedDocumentVersion {
    pub path: String,
    pub revision: Revision,
    /// Raw text with carriage returns removed
    pub text: String,
    pub lines: Vec<TaggedLine>,
}

impl TaggedDocumentVersion {
    pub fn new(path: &str, revision: Revision, text: &str, diagnostics: &mut Diagnostics) -> Self {
        let text = text.replace('\r', "");
        let lines = TagParser::parse(path, &text, diagnostics);

        tracing::debug!("Loaded {} at {} ({} lines)", path, revision, lines.len());

        TaggedDocumentVersion {
            path: path.to_string(),
            revision,
            text,
            lines,
        }
    }

    /// Evaluate `query` against this version. `None` means nothing matched.
    pub fn query(&self, query: &TagQuery) -> Option<String> {
        evaluate(&self.lines, query)
    }

    /// Every tag that labels at least one line.
    pub fn tag_names(&self) -> BTreeSet<String> {
        self.lines
            .iter()
            .flat_map(|line| line.tags.iter().cloned())
            .collect()
    }

    /// Tagged lines longer than `limit` characters.
    pub fn lines_over_limit(&self, limit: usize) -> Vec<&TaggedLine> {
        self.lines
            .iter()
            .filter(|line| line.text.chars().count() > limit)
            .collect()
    }
}

/// A tagged source file, with every revision of it that has been asked for.
///
/// The working copy is loaded when the document is opened. Other revisions
/// are loaded on first use and kept for the life of the document, including
/// the fact that the file did not exist at a revision.
pub struct TaggedDocument {
    path: String,
    repository: Arc<dyn SourceRepository>,
    versions: HashMap<Revision, Option<TaggedDocumentVersion>>,
}

impl TaggedDocument {
    /// Open the document at `path` and load its working copy.
    pub fn open(
        repository: Arc<dyn SourceRepository>,
        path: &str,
        diagnostics: &mut Diagnostics,
    ) -> Result<Self> {
        let mut document = TaggedDocument {
            path: path.to_string(),
            repository,
            versions: HashMap::new(),
        };
        document.resolve(&Revision::WorkingCopy, diagnostics)?;
        Ok(document)
    }

    /// Open every file in `repository` with one of `extensions`, in
    /// discovery order.
    pub fn find_all(
        repository: Arc<dyn SourceRepository>,
        extensions: &[String],
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<TaggedDocument>> {
        repository
            .files_with_extensions(extensions)?
            .iter()
            .map(|path| TaggedDocument::open(Arc::clone(&repository), path, diagnostics))
            .collect()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// This document at `revision`, or `None` if it did not exist there.
    pub fn resolve(
        &mut self,
        revision: &Revision,
        diagnostics: &mut Diagnostics,
    ) -> Result<Option<&TaggedDocumentVersion>> {
        if !self.versions.contains_key(revision) {
            let version = self
                .repository
                .content(&self.path, revision)?
                .map(|text| {
                    TaggedDocumentVersion::new(&self.path, revision.clone(), &text, diagnostics)
                });

            if version.is_none() {
                tracing::debug!("{} does not exist at {}", self.path, revision);
            }
            self.versions.insert(revision.clone(), version);
        }

        Ok(self.versions.get(revision).and_then(Option::as_ref))
    }

    /// The working copy, loaded when the document was opened.
    pub fn working_copy(&self) -> Option<&TaggedDocumentVersion> {
        self.versions
            .get(&Revision::WorkingCopy)
            .and_then(Option::as_ref)
    }
}

impl std::fmt::Debug for TaggedDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaggedDocument")
            .field("path", &self.path)
            .field("cached_revisions", &self.versions.len())
            .finish()
    }
}
