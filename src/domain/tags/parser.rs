//! Tag parsing from source files
//!
//! Source files mark regions with comment markers:
//!
//! ```text
//! // BEGIN setup
//! let view = View()
//! // END setup
//! ```
//!
//! Regions nest. Every line inside at least one region becomes a
//! [`TaggedLine`] carrying the names of all regions open around it,
//! outermost first.

use crate::domain::{Diagnostic, Diagnostics};
use regex::Regex;
use std::sync::OnceLock;

/// Substrings that hide a line from every snippet, whatever tags are open.
const EXCLUSION_MARKERS: [&str; 3] = ["//-", "/*-", "-*/"];

fn begin_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"// BEGIN\s+(\S+)").unwrap())
}

fn end_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"// END\s+(\S+)").unwrap())
}

fn is_excluded(line: &str) -> bool {
    EXCLUSION_MARKERS.iter().any(|marker| line.contains(marker))
}

/// A line of a source file along with the tags open around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedLine {
    /// Path of the source file, relative to the tagged tree
    pub source: String,

    /// 1-based line number in the source file
    pub line_number: usize,

    pub text: String,

    /// Open tags, outermost first. Never empty.
    pub tags: Vec<String>,
}

impl TaggedLine {
    /// The tag that was opened most recently around this line.
    pub fn innermost_tag(&self) -> &str {
        self.tags.last().map(String::as_str).unwrap_or_default()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Stack of currently open tags
#[derive(Debug, Default)]
struct TagStack {
    stack: Vec<String>,
}

impl TagStack {
    fn contains(&self, tag: &str) -> bool {
        self.stack.iter().any(|t| t == tag)
    }

    fn push(&mut self, tag: &str) {
        self.stack.push(tag.to_string());
    }

    /// Remove the innermost occurrence of `tag`. Returns false if it was not open.
    fn pop(&mut self, tag: &str) -> bool {
        match self.stack.iter().rposition(|t| t == tag) {
            Some(index) => {
                self.stack.remove(index);
                true
            }
            None => false,
        }
    }

    fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    fn snapshot(&self) -> Vec<String> {
        self.stack.clone()
    }
}

pub struct TagParser;

impl TagParser {
    /// Scan `text` and return every line that sits inside at least one tag.
    ///
    /// A `BEGIN` for an already open tag is reported and pushed again, so the
    /// nesting depth always follows the order of the markers. An `END` for a
    /// tag that is not open is reported and ignored. Tags still open at the
    /// end of the text are reported but lines keep the tags they were
    /// recorded with.
    pub fn parse(path: &str, text: &str, diagnostics: &mut Diagnostics) -> Vec<TaggedLine> {
        let mut lines = Vec::new();
        let mut open = TagStack::default();

        for (index, line) in text.split('\n').enumerate() {
            let line_number = index + 1;

            if is_excluded(line) {
                continue;
            }

            if let Some(captures) = begin_regex().captures(line) {
                let tag = &captures[1];
                if open.contains(tag) {
                    diagnostics.push(Diagnostic::DuplicateEnter {
                        path: path.to_string(),
                        line: line_number,
                        tag: tag.to_string(),
                    });
                }
                open.push(tag);
            } else if let Some(captures) = end_regex().captures(line) {
                let tag = &captures[1];
                if !open.pop(tag) {
                    diagnostics.push(Diagnostic::UnmatchedExit {
                        path: path.to_string(),
                        line: line_number,
                        tag: tag.to_string(),
                    });
                }
            } else if !open.is_empty() {
                lines.push(TaggedLine {
                    source: path.to_string(),
                    line_number,
                    text: line.to_string(),
                    tags: open.snapshot(),
                });
            }
        }

        for tag in open.snapshot() {
            diagnostics.push(Diagnostic::UnclosedTag {
                path: path.to_string(),
                tag,
            });
        }

        lines
    }
}
