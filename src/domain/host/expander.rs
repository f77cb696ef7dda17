//! Directive expansion over a cleaned host document

use super::clean::{clean, collapse_blank_lines, fence_for};
use super::Directive;
use crate::domain::suggest::Suggester;
use crate::domain::tags::{TagQuery, TaggedDocument};
use crate::domain::{Diagnostic, Diagnostics, Revision};
use crate::error::Result;
use crate::infrastructure::SourceRepository;
use std::collections::BTreeSet;
use std::path::Path;

/// How generated blocks are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Language for the `[source,<language>]` line; omitted when `None`
    pub language: Option<String>,

    /// Add a `.Snippet <n>: <id>` title naming each snippet
    pub show_query: bool,

    /// Start each block with a `+` so it attaches to a list item
    pub inline_list_items: bool,

    /// Only remove generated blocks, expand nothing
    pub clean: bool,
}

/// Output of rendering one host document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    /// The rendered text differs from the input
    pub dirty: bool,
}

/// Evaluate `query` against every document present at its revision.
///
/// Results are concatenated line by line in document order. `None` means no
/// document produced a match.
pub fn query_documents(
    documents: &mut [TaggedDocument],
    query: &TagQuery,
    diagnostics: &mut Diagnostics,
) -> Result<Option<Vec<String>>> {
    let mut matched: Option<Vec<String>> = None;

    for document in documents.iter_mut() {
        let Some(version) = document.resolve(&query.revision, diagnostics)? else {
            continue;
        };
        if let Some(text) = version.query(query) {
            matched
                .get_or_insert_with(Vec::new)
                .extend(text.split('\n').map(str::to_string));
        }
    }

    Ok(matched)
}

/// Tag names defined across all documents at `revision`, and how many
/// documents exist there.
fn tag_union(
    documents: &mut [TaggedDocument],
    revision: &Revision,
    diagnostics: &mut Diagnostics,
) -> Result<(Vec<String>, usize)> {
    let mut names = BTreeSet::new();
    let mut present = 0;

    for document in documents.iter_mut() {
        if let Some(version) = document.resolve(revision, diagnostics)? {
            present += 1;
            names.extend(version.tag_names());
        }
    }

    Ok((names.into_iter().collect(), present))
}

/// Single forward scan state.
pub struct Expander<'a> {
    host: &'a Path,
    documents: &'a mut [TaggedDocument],
    repository: &'a dyn SourceRepository,
    options: &'a RenderOptions,
    suggester: &'a dyn Suggester,
    diagnostics: &'a mut Diagnostics,

    revision: Revision,
    known_tags: Vec<String>,
    snippet_index: usize,
    output: Vec<String>,
}

impl<'a> Expander<'a> {
    pub fn new(
        host: &'a Path,
        documents: &'a mut [TaggedDocument],
        repository: &'a dyn SourceRepository,
        options: &'a RenderOptions,
        suggester: &'a dyn Suggester,
        diagnostics: &'a mut Diagnostics,
    ) -> Self {
        Expander {
            host,
            documents,
            repository,
            options,
            suggester,
            diagnostics,
            revision: Revision::WorkingCopy,
            known_tags: Vec::new(),
            snippet_index: 0,
            output: Vec::new(),
        }
    }

    /// Render `text`. Always works from the cleaned form of the text, so
    /// rendering an already rendered document gives the same result.
    pub fn render(mut self, text: &str) -> Result<Rendered> {
        let cleaned = clean(text);

        if self.options.clean {
            return Ok(Rendered {
                dirty: cleaned != text,
                text: cleaned,
            });
        }

        self.switch_revision(Revision::WorkingCopy)?;

        for line in cleaned.split('\n') {
            self.output.push(line.to_string());

            match Directive::parse(line) {
                Some(Directive::TagSwitch(revision)) => self.switch_revision(revision)?,
                Some(Directive::Snippet(raw)) => self.expand_snippet(raw)?,
                Some(Directive::Include(name)) => self.expand_include(name)?,
                None => {}
            }
        }

        let rendered = collapse_blank_lines(self.output.iter().map(String::as_str)).join("\n");

        Ok(Rendered {
            dirty: rendered != text,
            text: rendered,
        })
    }

    fn switch_revision(&mut self, revision: Revision) -> Result<()> {
        let (known_tags, present) = tag_union(self.documents, &revision, self.diagnostics)?;

        if present == 0 && !self.documents.is_empty() {
            self.diagnostics.push(Diagnostic::EmptyRevision {
                host: self.host.to_path_buf(),
                revision: revision.clone(),
            });
        }

        tracing::debug!(
            "{}: switched to {} ({} documents, {} tags)",
            self.host.display(),
            revision,
            present,
            known_tags.len()
        );

        self.known_tags = known_tags;
        self.revision = revision;
        Ok(())
    }

    fn push_prelude(&mut self) {
        if self.options.inline_list_items {
            self.output.push("+".to_string());
        }
    }

    fn push_block(&mut self, body: Vec<String>) {
        let fence = fence_for(&body);
        self.output.push(fence.clone());
        self.output.extend(body);
        self.output.push(fence);
    }

    fn expand_snippet(&mut self, raw: &str) -> Result<()> {
        let query = TagQuery::parse(raw, self.revision.clone());
        let index = self.snippet_index;
        self.snippet_index += 1;

        match query_documents(self.documents, &query, self.diagnostics)? {
            Some(lines) => {
                self.push_prelude();
                if self.options.show_query {
                    self.output
                        .push(format!(".Snippet {}: {}", index, query.as_filename()));
                }
                if let Some(language) = &self.options.language {
                    self.output.push(format!("[source,{}]", language));
                }
                self.push_block(lines);
            }
            None => {
                let suggestions = query
                    .primary_tag()
                    .map(|tag| self.suggester.suggest(tag, &self.known_tags))
                    .unwrap_or_default();

                self.push_prelude();
                self.output.push("[WARNING]".to_string());
                self.output.push("====".to_string());
                self.output.push(format!(
                    "No code matched the query \"{}\" at revision {}.",
                    query.raw, query.revision
                ));
                self.output.push("====".to_string());

                self.diagnostics.push(Diagnostic::NoMatch {
                    host: self.host.to_path_buf(),
                    query: query.raw.clone(),
                    revision: query.revision.clone(),
                    suggestions,
                });
            }
        }

        Ok(())
    }

    fn expand_include(&mut self, name: &str) -> Result<()> {
        match self.repository.find_by_name(name)? {
            Some(contents) => {
                let contents = contents.replace('\r', "");
                let body = contents
                    .strip_suffix('\n')
                    .unwrap_or(&contents)
                    .split('\n')
                    .map(str::to_string)
                    .collect();

                self.push_prelude();
                self.push_block(body);
            }
            None => {
                self.diagnostics.push(Diagnostic::IncludeNotFound {
                    host: self.host.to_path_buf(),
                    name: name.to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::suggest::{EditDistanceSuggester, NoSuggestions};
    use crate::infrastructure::MemoryRepository;
    use std::sync::Arc;

    const SAMPLE: &str = "\
class View {
    // BEGIN setup
    func setup() {
        // BEGIN body
        draw()
        // END body
    }
    // END setup
}
";

    struct Fixture {
        repository: Arc<MemoryRepository>,
        documents: Vec<TaggedDocument>,
    }

    impl Fixture {
        fn new(repository: MemoryRepository) -> Self {
            let repository = Arc::new(repository);
            let shared: Arc<dyn SourceRepository> = repository.clone();
            let documents =
                TaggedDocument::find_all(shared, &["swift".to_string()], &mut Diagnostics::new())
                    .unwrap();
            Fixture {
                repository,
                documents,
            }
        }

        fn render(&mut self, text: &str, options: &RenderOptions) -> (Rendered, Vec<Diagnostic>) {
            let mut diagnostics = Diagnostics::new();
            let rendered = Expander::new(
                Path::new("chapter.txt"),
                &mut self.documents,
                self.repository.as_ref(),
                options,
                &EditDistanceSuggester::default(),
                &mut diagnostics,
            )
            .render(text)
            .unwrap();
            (rendered, diagnostics.into_vec())
        }

        fn expand(&mut self, text: &str) -> String {
            self.render(text, &RenderOptions::default()).0.text
        }
    }

    fn sample() -> Fixture {
        Fixture::new(MemoryRepository::new().with_working_file("View.swift", SAMPLE))
    }

    fn swift() -> RenderOptions {
        RenderOptions {
            language: Some("swift".to_string()),
            ..RenderOptions::default()
        }
    }

    #[test]
    fn test_expands_snippet() {
        let mut fixture = sample();
        let (rendered, diagnostics) = fixture.render("Intro\n// snip: setup\nOutro\n", &swift());

        assert_eq!(
            rendered.text,
            "Intro\n// snip: setup\n[source,swift]\n----\nfunc setup() {\n    draw()\n}\n----\nOutro\n"
        );
        assert!(rendered.dirty);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_rerender_is_stable_and_clean() {
        let mut fixture = sample();
        let first = fixture.render("// snip: setup except body\n", &swift()).0;
        let second = fixture.render(&first.text, &swift()).0;

        assert_eq!(first.text, second.text);
        assert!(!second.dirty);
    }

    #[test]
    fn test_no_match_emits_warning_block_and_suggestions() {
        let mut fixture = sample();
        let (rendered, diagnostics) = fixture.render("// snip: setp\n", &RenderOptions::default());

        assert_eq!(
            rendered.text,
            "// snip: setp\n[WARNING]\n====\nNo code matched the query \"setp\" at revision working copy.\n====\n"
        );
        assert_eq!(diagnostics.len(), 1);
        match &diagnostics[0] {
            Diagnostic::NoMatch { suggestions, .. } => {
                assert_eq!(suggestions.first().map(String::as_str), Some("setup"));
            }
            other => panic!("Expected NoMatch, got {:?}", other),
        }
    }

    #[test]
    fn test_suggester_can_be_disabled() {
        let mut fixture = sample();
        let mut diagnostics = Diagnostics::new();
        Expander::new(
            Path::new("chapter.txt"),
            &mut fixture.documents,
            fixture.repository.as_ref(),
            &RenderOptions::default(),
            &NoSuggestions,
            &mut diagnostics,
        )
        .render("// snip: setp")
        .unwrap();

        assert!(matches!(
            diagnostics.iter().next(),
            Some(Diagnostic::NoMatch { suggestions, .. }) if suggestions.is_empty()
        ));
    }

    #[test]
    fn test_show_query_and_inline_list_items() {
        let mut fixture = sample();
        let options = RenderOptions {
            language: Some("swift".to_string()),
            show_query: true,
            inline_list_items: true,
            clean: false,
        };
        let (rendered, _) = fixture.render("// snip: body\n// snip: isolating setup\n", &options);

        assert_eq!(
            rendered.text,
            "// snip: body\n+\n.Snippet 0: body\n[source,swift]\n----\ndraw()\n----\n\
             // snip: isolating setup\n+\n.Snippet 1: isolating_setup\n[source,swift]\n----\nfunc setup() {\n}\n----\n"
        );
    }

    #[test]
    fn test_tag_switch_uses_named_revision() {
        let mut fixture = Fixture::new(
            MemoryRepository::new()
                .with_working_file("View.swift", SAMPLE)
                .with_committed_file("v1", "View.swift", "// BEGIN setup\nold()\n// END setup\n"),
        );

        let text = fixture.expand("// snip: setup\n// tag: v1\n// snip: setup\n// tag: working copy\n// snip: body\n");

        assert_eq!(
            text,
            "// snip: setup\n----\nfunc setup() {\n    draw()\n}\n----\n\
             // tag: v1\n// snip: setup\n----\nold()\n----\n\
             // tag: working copy\n// snip: body\n----\ndraw()\n----\n"
        );
    }

    #[test]
    fn test_documents_absent_at_revision_are_skipped() {
        let mut fixture = Fixture::new(
            MemoryRepository::new()
                .with_working_file("A.swift", "// BEGIN a\nnew a\n// END a\n")
                .with_working_file("B.swift", "// BEGIN b\nnew b\n// END b\n")
                .with_committed_file("v1", "A.swift", "// BEGIN a\nold a\n// END a\n"),
        );

        let (rendered, diagnostics) = fixture.render("// tag: v1\n// snip: a b\n", &RenderOptions::default());

        assert_eq!(rendered.text, "// tag: v1\n// snip: a b\n----\nold a\n----\n");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unknown_revision_is_reported() {
        let mut fixture = sample();
        let (rendered, diagnostics) = fixture.render("// tag: v9\n// snip: setup\n", &RenderOptions::default());

        assert!(rendered.text.contains("[WARNING]"));
        assert!(matches!(diagnostics[0], Diagnostic::EmptyRevision { .. }));
        assert!(matches!(diagnostics[1], Diagnostic::NoMatch { .. }));
    }

    #[test]
    fn test_results_concatenate_in_document_order() {
        let mut fixture = Fixture::new(
            MemoryRepository::new()
                .with_working_file("B.swift", "// BEGIN shared\n  from b\n// END shared\n")
                .with_working_file("A.swift", "// BEGIN shared\n    from a\n// END shared\n"),
        );

        let text = fixture.expand("// snip: shared");
        assert_eq!(text, "// snip: shared\n----\nfrom a\nfrom b\n----");
    }

    #[test]
    fn test_include_file() {
        let mut fixture = Fixture::new(
            MemoryRepository::new()
                .with_working_file("View.swift", SAMPLE)
                .with_working_file("res/Info.plist", "<plist>\r\n</plist>\r\n"),
        );

        let (rendered, diagnostics) = fixture.render("// include: Info.plist\n", &RenderOptions::default());

        assert_eq!(rendered.text, "// include: Info.plist\n----\n<plist>\n</plist>\n----\n");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_include_missing_file_leaves_directive() {
        let mut fixture = sample();
        let (rendered, diagnostics) = fixture.render("// include: Missing.plist\n", &RenderOptions::default());

        assert_eq!(rendered.text, "// include: Missing.plist\n");
        assert!(!rendered.dirty);
        assert_eq!(
            diagnostics,
            vec![Diagnostic::IncludeNotFound {
                host: Path::new("chapter.txt").to_path_buf(),
                name: "Missing.plist".to_string(),
            }]
        );
    }

    #[test]
    fn test_body_containing_fence_gets_longer_fence() {
        let mut fixture = Fixture::new(
            MemoryRepository::new().with_working_file("Doc.swift", "// BEGIN doc\n----\n// END doc\n"),
        );

        let text = fixture.expand("// snip: doc\nafter");
        assert_eq!(text, "// snip: doc\n-----\n----\n-----\nafter");
        assert_eq!(clean(&text), "// snip: doc\nafter");
    }

    #[test]
    fn test_blank_runs_are_collapsed() {
        let mut fixture = sample();
        let text = fixture.expand("a\n\n\n\nb");
        assert_eq!(text, "a\n\nb");
    }

    #[test]
    fn test_clean_mode() {
        let mut fixture = sample();
        let options = RenderOptions {
            clean: true,
            ..RenderOptions::default()
        };

        let expanded = fixture.expand("// snip: body\n");
        let (cleaned, diagnostics) = fixture.render(&expanded, &options);

        assert_eq!(cleaned.text, "// snip: body\n");
        assert!(cleaned.dirty);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_idempotence_properties() {
        let mut fixture = Fixture::new(
            MemoryRepository::new()
                .with_working_file("View.swift", SAMPLE)
                .with_working_file("Info.plist", "<plist/>")
                .with_committed_file("v1", "View.swift", "// BEGIN setup\n\n\nold()\n// END setup\n"),
        );

        let documents = [
            "Intro\n\n\n// snip: setup\nText\n",
            "// snip: missing\n// include: Info.plist\n// include: Nope.plist\n",
            "// tag: v1\n// snip: setup\n----\nstale\n----\n[source,swift]\n----\nstale too\n----\n",
            "* item\n// snip: body\n+\n[source,swift]\n----\nold\n----\n\n\n",
        ];

        for document in documents {
            let expanded = fixture.expand(document);
            let cleaned = clean(document);

            assert_eq!(fixture.expand(&cleaned), expanded, "expand(clean(D)) for {:?}", document);
            assert_eq!(clean(&expanded), cleaned, "clean(expand(D)) for {:?}", document);
            assert_eq!(fixture.expand(&expanded), expanded, "expand(expand(D)) for {:?}", document);
        }
    }
}
