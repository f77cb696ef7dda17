//! Removing previously generated blocks from host documents
//!
//! A generated block is everything the expander writes after a snippet or
//! include directive:
//!
//! ```text
//! // snip: setup           <- kept
//! +                        <- optional list continuation
//! .Snippet 0: setup        <- optional title
//! [source,swift]           <- optional attribute lines
//! ----                     <- opening fence
//! let view = View()
//! ----                     <- closing fence, same as the opening one
//! ```
//!
//! Cleaning drops every such block that directly follows a directive and
//! collapses runs of blank lines, so cleaning twice changes nothing.

use super::Directive;

/// Whether `line` is a block delimiter: four or more `-` or `=`.
pub fn is_fence(line: &str) -> bool {
    let line = line.trim_end();
    line.len() >= 4 && (line.bytes().all(|b| b == b'-') || line.bytes().all(|b| b == b'='))
}

/// Lines that may sit between a directive and the opening fence.
fn is_annotation(line: &str) -> bool {
    let line = line.trim_end();

    if line == "+" {
        return true;
    }
    if line.len() >= 2 && line.starts_with('[') && line.ends_with(']') {
        return true;
    }
    // Block title: `.Title`, but not `..` or `. item`
    line.strip_prefix('.')
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c != '.' && !c.is_whitespace())
}

/// Index of the closing fence of a generated block starting at `start`.
fn generated_block_end(lines: &[&str], start: usize) -> Option<usize> {
    let mut index = start;
    while index < lines.len() && is_annotation(lines[index]) {
        index += 1;
    }

    let fence = lines.get(index)?.trim_end();
    if !is_fence(fence) {
        return None;
    }

    (index + 1..lines.len()).find(|&k| lines[k].trim_end() == fence)
}

/// A fence made of `-` that does not occur as a line of `body`.
pub fn fence_for(body: &[String]) -> String {
    let mut fence = "----".to_string();
    while body.iter().any(|line| line.trim_end() == fence) {
        fence.push('-');
    }
    fence
}

/// Collapse runs of blank lines to a single blank line.
pub fn collapse_blank_lines<'a, I>(lines: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut collapsed: Vec<&str> = Vec::new();
    let mut previous_blank = false;

    for line in lines {
        let blank = line.trim().is_empty();
        if blank && previous_blank {
            continue;
        }
        previous_blank = blank;
        collapsed.push(line);
    }

    collapsed
}

/// Strip generated blocks after every snippet and include directive.
pub fn clean(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut kept: Vec<&str> = Vec::with_capacity(lines.len());
    let mut index = 0;

    while index < lines.len() {
        let line = lines[index];
        kept.push(line);
        index += 1;

        if Directive::parse(line).is_some_and(|d| d.expands()) {
            while let Some(end) = generated_block_end(&lines, index) {
                index = end + 1;
            }
        }
    }

    collapse_blank_lines(kept).join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_removes_generated_block() {
        let expanded = "Intro\n// snip: a\n[source,swift]\n----\nlet a = 1\n----\nOutro\n";
        assert_eq!(clean(expanded), "Intro\n// snip: a\nOutro\n");
    }

    #[test]
    fn test_clean_without_annotation() {
        let expanded = "// snip: a\n----\nx\n----\n";
        assert_eq!(clean(expanded), "// snip: a\n");
    }

    #[test]
    fn test_clean_with_title_and_continuation() {
        let expanded = "* item\n// snip: a\n+\n.Snippet 0: a\n[source,swift]\n----\nx\n----\n";
        assert_eq!(clean(expanded), "* item\n// snip: a\n");
    }

    #[test]
    fn test_clean_removes_warning_block() {
        let expanded = "// snip: nope\n[WARNING]\n====\nNo code matched.\n====\nafter";
        assert_eq!(clean(expanded), "// snip: nope\nafter");
    }

    #[test]
    fn test_clean_removes_include_block() {
        let expanded = "// include: Info.plist\n----\n<plist/>\n----\n";
        assert_eq!(clean(expanded), "// include: Info.plist\n");
    }

    #[test]
    fn test_clean_strips_consecutive_blocks() {
        let expanded = "// snip: a\n----\nx\n----\n----\ny\n----\nend";
        assert_eq!(clean(expanded), "// snip: a\nend");
    }

    #[test]
    fn test_clean_keeps_blocks_not_directly_after_directive() {
        let text = "// snip: a\n\n[source,swift]\n----\nhand written\n----\n";
        assert_eq!(clean(text), text);
    }

    #[test]
    fn test_clean_keeps_blocks_after_other_lines() {
        let text = "// tag: v1\n----\nkept\n----\n// just a comment\n----\nkept\n----";
        assert_eq!(clean(text), text);
    }

    #[test]
    fn test_clean_keeps_unterminated_block() {
        let text = "// snip: a\n----\nno closing fence";
        assert_eq!(clean(text), text);
    }

    #[test]
    fn test_clean_matches_longer_fence() {
        let expanded = "// snip: a\n-----\nx\n----\ny\n-----\nafter";
        assert_eq!(clean(expanded), "// snip: a\nafter");
    }

    #[test]
    fn test_clean_is_idempotent() {
        let text = "a\n\n\n// snip: x\n----\n1\n----\n----\n2\n----\n\n\n\nb\n";
        let once = clean(text);
        assert_eq!(clean(&once), once);
    }

    #[test]
    fn test_collapse_blank_lines() {
        let lines = vec!["a", "", "", "  ", "b", "", "c"];
        assert_eq!(collapse_blank_lines(lines), vec!["a", "", "b", "", "c"]);
    }

    #[test]
    fn test_is_fence() {
        assert!(is_fence("----"));
        assert!(is_fence("======"));
        assert!(is_fence("---- "));
        assert!(!is_fence("---"));
        assert!(!is_fence("--=-"));
        assert!(!is_fence("// ----"));
    }

    #[test]
    fn test_is_annotation() {
        assert!(is_annotation("+"));
        assert!(is_annotation("[source,swift]"));
        assert!(is_annotation(".Snippet 3: setup"));
        assert!(!is_annotation("..."));
        assert!(!is_annotation(". item"));
        assert!(!is_annotation("plain"));
        assert!(!is_annotation("[]x"));
    }

    #[test]
    fn test_fence_for_avoids_body_lines() {
        let body = vec!["a".to_string()];
        assert_eq!(fence_for(&body), "----");

        let body = vec!["----".to_string(), "-----".to_string()];
        assert_eq!(fence_for(&body), "------");
    }
}
