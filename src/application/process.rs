//! Rendering use case
//!
//! Renders every host document and writes the ones whose output changed.

use super::Workspace;
use crate::domain::{Diagnostics, RenderOptions, Suggester};
use crate::error::Result;
use crate::infrastructure::files;
use std::path::PathBuf;

/// Options for processing
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    pub render: RenderOptions,

    /// Report what would be written without touching any file
    pub dry_run: bool,

    /// Appended to each host document's path when writing
    pub suffix: String,
}

/// What a processing run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessReport {
    /// Host documents considered
    pub total: usize,

    /// Host documents whose rendering differed from their contents
    pub changed: Vec<PathBuf>,
}

pub struct ProcessService<'a> {
    suggester: &'a dyn Suggester,
}

impl<'a> ProcessService<'a> {
    pub fn new(suggester: &'a dyn Suggester) -> Self {
        ProcessService { suggester }
    }

    /// Render every host document in `workspace`.
    ///
    /// Changed documents are written to their path plus `options.suffix`
    /// unless this is a dry run.
    pub fn execute(
        &self,
        workspace: &mut Workspace,
        options: &ProcessOptions,
        diagnostics: &mut Diagnostics,
    ) -> Result<ProcessReport> {
        let mut report = ProcessReport {
            total: workspace.hosts.len(),
            changed: Vec::new(),
        };

        for host in &workspace.hosts {
            let rendered = host.render(
                &mut workspace.documents,
                workspace.repository.as_ref(),
                &options.render,
                self.suggester,
                diagnostics,
            )?;

            if !rendered.dirty {
                tracing::debug!("{} is up to date", host.path().display());
                continue;
            }

            if options.dry_run {
                tracing::info!("Would write {}", host.path().display());
            } else {
                let mut target = host.path().as_os_str().to_owned();
                target.push(&options.suffix);
                files::write_atomic(&PathBuf::from(target), &rendered.text)?;
                tracing::info!("Writing {}", host.path().display());
            }

            report.changed.push(host.path().to_path_buf());
        }

        Ok(report)
    }
}
