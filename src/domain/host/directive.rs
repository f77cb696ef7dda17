//! Directive lines in host documents
//!
//! Directives are AsciiDoc comment lines, so they never show up in the
//! rendered book:
//!
//! ```text
//! // tag: v1.2
//! // snip: setup except debug
//! // include: Info.plist
//! ```

use crate::domain::Revision;

pub const TAG_PREFIX: &str = "// tag:";
pub const SNIP_PREFIX: &str = "// snip:";
pub const INCLUDE_PREFIX: &str = "// include:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive<'a> {
    /// Switch the revision used by the snippets that follow
    TagSwitch(Revision),
    /// Expand the query into a code block
    Snippet(&'a str),
    /// Copy a file from the tagged tree verbatim
    Include(&'a str),
}

impl<'a> Directive<'a> {
    pub fn parse(line: &'a str) -> Option<Self> {
        if let Some(rest) = line.strip_prefix(TAG_PREFIX) {
            Some(Directive::TagSwitch(Revision::parse(rest)))
        } else if let Some(rest) = line.strip_prefix(SNIP_PREFIX) {
            Some(Directive::Snippet(rest.trim()))
        } else {
            line.strip_prefix(INCLUDE_PREFIX)
                .map(|rest| Directive::Include(rest.trim()))
        }
    }

    /// Whether generated content follows this directive in rendered output.
    pub fn expands(&self) -> bool {
        !matches!(self, Directive::TagSwitch(_))
    }
}
