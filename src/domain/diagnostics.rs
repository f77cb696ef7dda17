//! Non-fatal findings collected while parsing, resolving and expanding.
//!
//! Nothing in here aborts a run. Every diagnostic is logged through `tracing`
//! at the moment it is recorded and kept in a [`Diagnostics`] collector so
//! callers and tests can inspect what happened.

use crate::domain::Revision;
use std::fmt;
use std::path::PathBuf;

/// How loudly a diagnostic is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Advisory,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// `BEGIN` for a tag that is already open
    DuplicateEnter {
        path: String,
        line: usize,
        tag: String,
    },

    /// `END` for a tag that is not open
    UnmatchedExit {
        path: String,
        line: usize,
        tag: String,
    },

    /// Tag still open when the file ended
    UnclosedTag { path: String, tag: String },

    /// A snippet query selected no lines in any document
    NoMatch {
        host: PathBuf,
        query: String,
        revision: Revision,
        suggestions: Vec<String>,
    },

    /// An `include:` target could not be found in the tagged tree
    IncludeNotFound { host: PathBuf, name: String },

    /// The same tag is defined in more than one tagged document
    DuplicateTag {
        tag: String,
        documents: Vec<String>,
        referenced_by: Vec<PathBuf>,
    },

    /// A tagged line is longer than the configured limit
    OverlongLine {
        path: String,
        line: usize,
        length: usize,
        limit: usize,
    },

    /// A `tag:` directive selected a revision where no tagged document exists
    EmptyRevision { host: PathBuf, revision: Revision },

    /// The tagged tree has no history; only the working copy is available
    NotVersioned { path: PathBuf },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::IncludeNotFound { .. } => Severity::Error,
            Diagnostic::OverlongLine { .. } => Severity::Advisory,
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::DuplicateEnter { path, line, tag } => {
                write!(f, "{}:{}: \"{}\" was entered twice without exiting it", path, line, tag)
            }
            Diagnostic::UnmatchedExit { path, line, tag } => {
                write!(f, "{}:{}: \"{}\" was exited, but had not yet been entered", path, line, tag)
            }
            Diagnostic::UnclosedTag { path, tag } => {
                write!(f, "{}: \"{}\" is still open at the end of the file", path, tag)
            }
            Diagnostic::NoMatch {
                host,
                query,
                revision,
                suggestions,
            } => {
                write!(
                    f,
                    "{}: query \"{}\" matched nothing at revision {}",
                    host.display(),
                    query,
                    revision
                )?;
                if !suggestions.is_empty() {
                    write!(f, " (did you mean: {}?)", suggestions.join(", "))?;
                }
                Ok(())
            }
            Diagnostic::IncludeNotFound { host, name } => {
                write!(f, "{}: failed to find {}", host.display(), name)
            }
            Diagnostic::DuplicateTag {
                tag,
                documents,
                referenced_by,
            } => {
                writeln!(f, "Tag '{}' is defined in multiple files:", tag)?;
                for doc in documents {
                    writeln!(f, " - {}", doc)?;
                }
                write!(f, "'{}' is used in documents:", tag)?;
                for host in referenced_by {
                    write!(f, "\n - {}", host.display())?;
                }
                Ok(())
            }
            Diagnostic::OverlongLine {
                path,
                line,
                length,
                limit,
            } => {
                write!(f, "Line too long: {}:{} ({} > {})", path, line, length, limit)
            }
            Diagnostic::EmptyRevision { host, revision } => {
                write!(
                    f,
                    "{}: no tagged documents exist at revision {}",
                    host.display(),
                    revision
                )
            }
            Diagnostic::NotVersioned { path } => {
                write!(
                    f,
                    "{} is not a git checkout; only the working copy can be queried",
                    path.display()
                )
            }
        }
    }
}

/// Ordered collector of diagnostics.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and log it.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity() {
            Severity::Error => tracing::error!("{}", diagnostic),
            Severity::Warning => tracing::warn!("{}", diagnostic),
            Severity::Advisory => tracing::info!("{}", diagnostic),
        }
        self.entries.push(diagnostic);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of diagnostics at or above `severity`.
    pub fn count_at_least(&self, severity: Severity) -> usize {
        self.entries
            .iter()
            .filter(|d| d.severity() >= severity)
            .count()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}
