//! Query evaluation against parsed tagged lines

use super::{TagQuery, TaggedLine};

/// Whether a single line is selected by `query`.
///
/// Isolation looks at the innermost tag only and wins over everything else.
/// Otherwise a line needs at least one included tag and no excluded tag.
pub fn line_matches(line: &TaggedLine, query: &TagQuery) -> bool {
    if query.isolate.iter().any(|tag| tag == line.innermost_tag()) {
        return true;
    }

    let included = query.include.iter().any(|tag| line.has_tag(tag));
    let excluded = query.exclude.iter().any(|tag| line.has_tag(tag));

    included && !excluded
}

/// Select, join and dedent the lines matching `query`.
///
/// Returns `None` when no line matched, which is different from a match whose
/// text happens to be empty.
///
/// # Examples
///
/// ```
/// use snipper::domain::tags::{evaluate, TagParser, TagQuery};
/// use snipper::domain::{Diagnostics, Revision};
///
/// let mut diagnostics = Diagnostics::new();
/// let lines = TagParser::parse(
///     "demo.swift",
///     "// BEGIN X\n    one\n    // BEGIN Y\n    two\n    // END Y\n// END X",
///     &mut diagnostics,
/// );
///
/// let query = TagQuery::parse("X except Y", Revision::WorkingCopy);
/// assert_eq!(evaluate(&lines, &query), Some("one".to_string()));
///
/// let query = TagQuery::parse("Z", Revision::WorkingCopy);
/// assert_eq!(evaluate(&lines, &query), None);
/// ```
pub fn evaluate(lines: &[TaggedLine], query: &TagQuery) -> Option<String> {
    let matched: Vec<&str> = lines
        .iter()
        .filter(|line| line_matches(line, query))
        .map(|line| line.text.as_str())
        .collect();

    if matched.is_empty() {
        return None;
    }

    Some(dedent(&matched.join("\n")))
}

/// Remove the longest leading whitespace shared by every non-blank line.
///
/// Whitespace-only lines are emptied and do not take part in finding the
/// common prefix. Tabs and spaces are compared literally.
pub fn dedent(text: &str) -> String {
    let mut margin: Option<&str> = None;

    for line in text.split('\n') {
        if line.trim().is_empty() {
            continue;
        }

        let indent = &line[..line.len() - line.trim_start_matches([' ', '\t']).len()];

        margin = Some(match margin {
            None => indent,
            Some(current) => common_prefix(current, indent),
        });
    }

    let margin = margin.unwrap_or("");

    text.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                line.strip_prefix(margin).unwrap_or(line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let length = a
        .char_indices()
        .zip(b.chars())
        .take_while(|((_, x), y)| x == y)
        .last()
        .map(|((index, c), _)| index + c.len_utf8())
        .unwrap_or(0);

    &a[..length]
}
