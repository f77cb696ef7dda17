//! Tag system

pub mod document;
pub mod evaluator;
pub mod parser;
pub mod query;

// Re-export main types
pub use document::{TaggedDocument, TaggedDocumentVersion};
pub use evaluator::{dedent, evaluate, line_matches};
pub use parser::{TagParser, TaggedLine};
pub use query::TagQuery;
