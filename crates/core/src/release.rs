//! Release-note line formatting
//!
//! Rewrites every ticket reference in a release item into a markdown link and
//! repairs the ` - ` separator that follows it.

use crate::tickets::{find_ticket_references, is_valid_base_url, TicketReference};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Separator between a ticket reference and the item description
static TRAILING_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*-[ \t]*").expect("separator pattern is valid"));

/// Text before the first ticket of a leading ticket list, e.g. `"- "`
static LIST_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*-[ \t]*$").expect("marker pattern is valid"));

/// Text between two tickets of the same list, e.g. `", "`
static LIST_JOINER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*,?[ \t]*$").expect("joiner pattern is valid"));

/// Normalized separator written after a linked ticket
const ITEM_SEPARATOR: &str = " - ";

/// Result of formatting a whole release-note document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedDocument {
    pub content: String,
    pub lines_total: usize,
    pub lines_changed: usize,
    pub links_created: usize,
}

/// Link every ticket reference in a single release item
///
/// Returns `line` unchanged when `base_url` is invalid or the line has no
/// ticket references.
///
/// ```
/// use relnotes_core::release::build_release_item_text;
///
/// let line = build_release_item_text("- AB-42-fix login", "https://tracker.example.com/edit/");
/// assert_eq!(line, "- [AB#42](https://tracker.example.com/edit/42) - fix login");
/// ```
pub fn build_release_item_text(line: &str, base_url: &str) -> String {
    link_ticket_references(line, base_url).0
}

/// Format every line of a release-note document
///
/// Line terminators are kept as written.
pub fn build_release_notes(text: &str, base_url: &str) -> FormattedDocument {
    let mut content = String::with_capacity(text.len());
    let mut lines_total = 0;
    let mut lines_changed = 0;
    let mut links_created = 0;

    for raw in text.split_inclusive('\n') {
        let (body, terminator) = split_terminator(raw);
        let (formatted, links) = link_ticket_references(body, base_url);

        lines_total += 1;
        links_created += links;
        if formatted != body {
            lines_changed += 1;
        }

        content.push_str(&formatted);
        content.push_str(terminator);
    }

    FormattedDocument {
        content,
        lines_total,
        lines_changed,
        links_created,
    }
}

/// Returns the rewritten line and the number of links created
fn link_ticket_references(line: &str, base_url: &str) -> (String, usize) {
    if !is_valid_base_url(base_url) {
        return (line.to_string(), 0);
    }

    let references = find_ticket_references(line);
    if references.is_empty() {
        return (line.to_string(), 0);
    }

    let mut output = String::with_capacity(line.len() + references.len() * base_url.len() * 2);
    let mut cursor = 0;

    let leading = leading_list_len(line, &references);

    for (index, reference) in references.iter().enumerate() {
        output.push_str(&line[cursor..reference.span.start]);
        output.push_str(&reference.markdown_link(base_url));
        cursor = reference.span.end;

        // Only the separator that closes the leading ticket list is repaired.
        if index + 1 != leading {
            continue;
        }

        let rest = &line[cursor..];
        if let Some(separator) = TRAILING_SEPARATOR_RE.find(rest) {
            if separator.end() < rest.len() {
                output.push_str(ITEM_SEPARATOR);
                cursor += separator.end();
            }
        }
    }

    output.push_str(&line[cursor..]);
    (output, references.len())
}

/// Number of references in the ticket list that opens the item
///
/// The list starts right after the `"- "` marker and continues while tickets
/// are joined by commas or whitespace. Zero when the line does not open with
/// a ticket.
fn leading_list_len(line: &str, references: &[TicketReference]) -> usize {
    let Some(first) = references.first() else {
        return 0;
    };
    if !LIST_MARKER_RE.is_match(&line[..first.span.start]) {
        return 0;
    }

    1 + references
        .windows(2)
        .take_while(|pair| LIST_JOINER_RE.is_match(&line[pair[0].span.end..pair[1].span.start]))
        .count()
}

fn split_terminator(raw: &str) -> (&str, &str) {
    if let Some(body) = raw.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = raw.strip_suffix('\n') {
        (body, "\n")
    } else {
        (raw, "")
    }
}
