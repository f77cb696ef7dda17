//! snipper - expands snippet directives in prose with tagged source code
//!
//! Host documents (AsciiDoc chapters of a book) contain directives such as
//! `// snip: setup except debug`. Source files mark regions with
//! `// BEGIN setup` / `// END setup`. Rendering replaces every directive's
//! generated block with the matching code, optionally taken from an older
//! git revision selected with `// tag: v1.0`.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::SnipperError;
