//! Application layer - Use cases and orchestration

pub mod checks;
pub mod extract;
pub mod process;
pub mod workspace;

pub use checks::{find_multiply_defined_tags, find_overlong_lines};
pub use extract::ExtractService;
pub use process::{ProcessOptions, ProcessReport, ProcessService};
pub use workspace::Workspace;
