//! Domain layer - tag parsing, queries, revisions and host expansion

pub mod diagnostics;
pub mod host;
pub mod revision;
pub mod suggest;
pub mod tags;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use host::{HostDocument, RenderOptions, Rendered};
pub use revision::{Revision, WORKING_COPY};
pub use suggest::{EditDistanceSuggester, NoSuggestions, Suggester};
