//! Infrastructure layer - file system, git and configuration

pub mod config;
pub mod files;
pub mod repository;

pub use config::Config;
pub use repository::{GitRepository, MemoryRepository, SourceRepository};
