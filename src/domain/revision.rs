//! Revisions of the tagged source tree

use std::fmt;

/// Spelling of the working-copy revision in `// tag:` directives.
///
/// Git ref names cannot contain spaces, so this never collides with a real ref.
pub const WORKING_COPY: &str = "working copy";

/// A point in the tagged tree's history.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Revision {
    /// Current on-disk content, including uncommitted changes
    #[default]
    WorkingCopy,
    /// A committed ref: tag, branch, or commit hash
    Named(String),
}

impl Revision {
    /// Parse the argument of a tag-switch directive.
    ///
    /// An empty argument and the working-copy sentinel (any case) both select
    /// the working copy.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");

        if normalized.is_empty() || normalized.eq_ignore_ascii_case(WORKING_COPY) {
            Revision::WorkingCopy
        } else {
            Revision::Named(text.to_string())
        }
    }

    pub fn is_working_copy(&self) -> bool {
        matches!(self, Revision::WorkingCopy)
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Revision::WorkingCopy => f.write_str(WORKING_COPY),
            Revision::Named(name) => f.write_str(name),
        }
    }
}
