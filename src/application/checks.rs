//! Whole-tree checks run before rendering

use crate::domain::tags::TaggedDocument;
use crate::domain::{Diagnostic, Diagnostics, HostDocument};
use std::collections::BTreeMap;

/// Report each tag defined in more than one tagged document, once, with
/// every document defining it and every host document using it.
pub fn find_multiply_defined_tags(
    documents: &[TaggedDocument],
    hosts: &[HostDocument],
    diagnostics: &mut Diagnostics,
) {
    tracing::debug!("Checking for multiple tag definitions");

    let mut defined_in: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for document in documents {
        let Some(version) = document.working_copy() else {
            continue;
        };
        for tag in version.tag_names() {
            defined_in
                .entry(tag)
                .or_default()
                .push(document.path().to_string());
        }
    }

    for (tag, documents) in defined_in {
        if documents.len() < 2 {
            continue;
        }

        let referenced_by = hosts
            .iter()
            .filter(|host| host.tags_used().contains(&tag))
            .map(|host| host.path().to_path_buf())
            .collect();

        diagnostics.push(Diagnostic::DuplicateTag {
            tag,
            documents,
            referenced_by,
        });
    }
}

/// Report working-copy tagged lines longer than `limit` characters.
pub fn find_overlong_lines(documents: &[TaggedDocument], limit: usize, diagnostics: &mut Diagnostics) {
    for version in documents.iter().filter_map(TaggedDocument::working_copy) {
        for line in version.lines_over_limit(limit) {
            diagnostics.push(Diagnostic::OverlongLine {
                path: line.source.clone(),
                line: line.line_number,
                length: line.text.chars().count(),
                limit,
            });
        }
    }
}
