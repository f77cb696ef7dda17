//! Error types for snipper

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors. Recoverable conditions are reported as
/// [`Diagnostic`](crate::domain::Diagnostic)s instead.
#[derive(Debug, Error)]
pub enum SnipperError {
    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Git error: {0}")]
    Git(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

impl SnipperError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            SnipperError::DirectoryNotFound(_) | SnipperError::NotADirectory(_) => 2,
            SnipperError::Config(_) | SnipperError::TomlDeserialize(_) => 3,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            SnipperError::DirectoryNotFound(_) | SnipperError::NotADirectory(_) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Pass the directory containing your prose documents first\n\
                    • Pass the root of the source code checkout second\n\
                    • Example: snipper book/ code/",
                    self
                )
            }
            SnipperError::Git(msg) => {
                format!(
                    "Git error: {}\n\n\
                    Suggestions:\n\
                    • Check that git is installed and in PATH\n\
                    • Check that the code directory is inside a git checkout",
                    msg
                )
            }
            SnipperError::Config(msg) => {
                format!(
                    "Configuration error: {}\n\n\
                    Valid keys in snipper.toml: language, source_extensions, tagged_extensions,\n\
                    max_line_length, show_query, inline_list_items, suffix",
                    msg
                )
            }
            SnipperError::TomlDeserialize(e) => {
                format!(
                    "Failed to parse snipper.toml: {}\n\n\
                    Example:\n\
                    language = \"swift\"\n\
                    max_line_length = 75",
                    e
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using SnipperError
pub type Result<T> = std::result::Result<T, SnipperError>;
