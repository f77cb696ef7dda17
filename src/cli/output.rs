//! Output formatting utilities

use crate::application::ProcessReport;
use crate::domain::{Diagnostics, Severity};

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// One-line summary of a processing run.
pub fn format_summary(report: &ProcessReport, diagnostics: &Diagnostics, dry_run: bool) -> String {
    let verb = if dry_run { "Would render" } else { "Rendered" };
    let mut summary = format!(
        "{} {} of {}",
        verb,
        report.changed.len(),
        plural(report.total, "document")
    );

    let problems = diagnostics.count_at_least(Severity::Warning);
    let advisories = diagnostics.len() - problems;

    if diagnostics.is_empty() {
        summary.push_str(", no diagnostics");
    } else {
        summary.push_str(&format!(
            ", {} ({}, {})",
            plural(diagnostics.len(), "diagnostic"),
            plural(problems, "problem"),
            plural(advisories, "note")
        ));
    }

    summary
}
