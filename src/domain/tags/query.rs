//! Snippet query parsing
//!
//! A query is a flat list of tag names. Three keywords switch which list the
//! following names go into:
//!
//! ```text
//! setup render except debug highlighting changed isolating body
//! ```
//!
//! Names before any keyword are included. There is no nesting, quoting or
//! escaping.
//!
//! # Examples
//!
//! ```
//! use snipper::domain::tags::TagQuery;
//! use snipper::domain::Revision;
//!
//! let query = TagQuery::parse("setup except debug", Revision::WorkingCopy);
//! assert_eq!(query.include, vec!["setup".to_string()]);
//! assert_eq!(query.exclude, vec!["debug".to_string()]);
//! ```

use crate::domain::Revision;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Include,
    Exclude,
    Highlight,
    Isolate,
}

impl Mode {
    fn from_keyword(word: &str) -> Option<Mode> {
        match word {
            "except" => Some(Mode::Exclude),
            "highlighting" => Some(Mode::Highlight),
            "isolating" => Some(Mode::Isolate),
            _ => None,
        }
    }
}

/// A parsed snippet query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagQuery {
    /// Query text as written after the directive prefix (trimmed)
    pub raw: String,

    /// Revision that was active where the query appeared
    pub revision: Revision,

    /// Lines carrying any of these tags are selected...
    pub include: Vec<String>,

    /// ...unless they carry any of these
    pub exclude: Vec<String>,

    /// Parsed but not used for selection
    pub highlight: Vec<String>,

    /// Lines whose innermost tag is one of these are always selected
    pub isolate: Vec<String>,
}

impl TagQuery {
    pub fn parse(raw: &str, revision: Revision) -> Self {
        let mut query = TagQuery {
            raw: raw.trim().to_string(),
            revision,
            include: Vec::new(),
            exclude: Vec::new(),
            highlight: Vec::new(),
            isolate: Vec::new(),
        };

        let mut mode = Mode::Include;

        for token in raw.split_whitespace() {
            if let Some(next) = Mode::from_keyword(token) {
                mode = next;
                continue;
            }

            let target = match mode {
                Mode::Include => &mut query.include,
                Mode::Exclude => &mut query.exclude,
                Mode::Highlight => &mut query.highlight,
                Mode::Isolate => &mut query.isolate,
            };
            target.push(token.to_string());
        }

        tracing::debug!(
            include = ?query.include,
            exclude = ?query.exclude,
            isolate = ?query.isolate,
            "parsed query"
        );

        query
    }

    /// The tag name most worth suggesting alternatives for.
    pub fn primary_tag(&self) -> Option<&str> {
        self.include
            .first()
            .or_else(|| self.isolate.first())
            .map(String::as_str)
    }

    /// Every tag name mentioned anywhere in the query.
    pub fn tags_named(&self) -> impl Iterator<Item = &str> {
        self.include
            .iter()
            .chain(&self.exclude)
            .chain(&self.highlight)
            .chain(&self.isolate)
            .map(String::as_str)
    }

    /// Identifier for naming an extracted snippet file.
    ///
    /// Whitespace becomes `_`, anything that is not safe in a file name
    /// becomes `_`, and named revisions are prefixed.
    pub fn as_filename(&self) -> String {
        let query = sanitize(&self.raw.split_whitespace().collect::<Vec<_>>().join("_"));

        match &self.revision {
            Revision::WorkingCopy => query,
            Revision::Named(name) => format!("{}_{}", sanitize(name), query),
        }
    }
}

fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' => c,
            _ => '_',
        })
        .collect()
}

impl std::fmt::Display for TagQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}
