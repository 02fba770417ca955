//! Ticket reference matching and markdown link rendering
//!
//! Pure functions that find `AB#1234` / `AB-1234` style references in a line of
//! release-note text and render them as markdown links into an issue tracker.

use regex::Regex;
use std::fmt;
use std::ops::Range;
use std::sync::LazyLock;

/// Literal prefix every ticket reference starts with
pub const TICKET_PREFIX: &str = "AB";

/// Ticket reference anywhere in a line
static TICKET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"AB([#-])?(\d+)").expect("ticket pattern is valid"));

/// Ticket reference directly after the `"- "` bullet marker
static ANCHORED_TICKET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"- (AB([#-])?(\d+))").expect("anchored pattern is valid"));

/// Existing markdown link, e.g. `[AB#1234](https://...)`
static MARKDOWN_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]\([^)]*\)").expect("link pattern is valid"));

/// How the source text separated the prefix from the id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    Hash,
    Hyphen,
    Absent,
}

impl Separator {
    fn from_capture(capture: Option<&str>) -> Self {
        match capture {
            Some("#") => Separator::Hash,
            Some("-") => Separator::Hyphen,
            _ => Separator::Absent,
        }
    }
}

/// A ticket reference matched in a line of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketReference {
    pub separator: Separator,
    /// Numeric id exactly as written, leading zeros included
    pub id: String,
    /// Byte range of the reference (`AB`, separator and id) in the searched text
    pub span: Range<usize>,
}

impl TicketReference {
    /// Display text with the separator normalized to `#`
    pub fn display_text(&self) -> String {
        format!("{TICKET_PREFIX}#{}", self.id)
    }

    /// Render as `[AB#<id>](<base_url><id>)`
    ///
    /// The base URL is used verbatim, so callers pass one ending in `/`.
    pub fn markdown_link(&self, base_url: &str) -> String {
        format!("[{}]({}{})", self.display_text(), base_url, self.id)
    }
}

impl fmt::Display for TicketReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_text())
    }
}

/// Check that a base URL is absolute with a non-empty scheme and host
pub fn is_valid_base_url(base_url: &str) -> bool {
    match url::Url::parse(base_url) {
        Ok(parsed) => {
            !parsed.scheme().is_empty() && parsed.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}

/// Find the first ticket reference that directly follows `"- "`
pub fn find_anchored_ticket_reference(text: &str) -> Option<TicketReference> {
    let caps = ANCHORED_TICKET_RE.captures(text)?;
    let reference = caps.get(1)?;
    let id = caps.get(3)?;

    Some(TicketReference {
        separator: Separator::from_capture(caps.get(2).map(|m| m.as_str())),
        id: id.as_str().to_string(),
        span: reference.range(),
    })
}

/// Find every ticket reference in `text`, in order of appearance
///
/// References inside an existing markdown link are skipped, so already-linked
/// text is never linked twice.
pub fn find_ticket_references(text: &str) -> Vec<TicketReference> {
    let links: Vec<Range<usize>> = MARKDOWN_LINK_RE
        .find_iter(text)
        .map(|m| m.range())
        .collect();

    TICKET_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let id = caps.get(2)?;
            Some(TicketReference {
                separator: Separator::from_capture(caps.get(1).map(|m| m.as_str())),
                id: id.as_str().to_string(),
                span: whole.range(),
            })
        })
        .filter(|reference| {
            !links
                .iter()
                .any(|link| link.start <= reference.span.start && reference.span.end <= link.end)
        })
        .collect()
}

/// Render a matched ticket reference as a markdown link
///
/// Returns `text` unchanged when `base_url` is invalid or there is no match.
pub fn format_ticket_reference(
    text: &str,
    reference: Option<&TicketReference>,
    base_url: &str,
) -> String {
    if !is_valid_base_url(base_url) {
        return text.to_string();
    }

    match reference {
        Some(reference) => reference.markdown_link(base_url),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_URL: &str = "https://dev.azure.com/parallax-app/Parallax%202023/_workitems/edit/";

    // ============================================================================
    // is_valid_base_url tests
    // ============================================================================

    #[test]
    fn test_is_valid_base_url_https() {
        assert!(is_valid_base_url(BASE_URL));
        assert!(is_valid_base_url("https://dev.azure.com/valid-url/"));
    }

    #[test]
    fn test_is_valid_base_url_rejects_relative() {
        assert!(!is_valid_base_url("invalid-url"));
        assert!(!is_valid_base_url("/_workitems/edit/"));
    }

    #[test]
    fn test_is_valid_base_url_rejects_empty() {
        assert!(!is_valid_base_url(""));
    }

    #[test]
    fn test_is_valid_base_url_rejects_missing_host() {
        assert!(!is_valid_base_url("mailto:someone@example.com"));
        assert!(!is_valid_base_url("file:///tmp/tickets/"));
    }

    // ============================================================================
    // find_anchored_ticket_reference tests
    // ============================================================================

    #[test]
    fn test_find_anchored_with_hash() {
        let reference = find_anchored_ticket_reference("- AB#1234 - some context").unwrap();
        assert_eq!(reference.separator, Separator::Hash);
        assert_eq!(reference.id, "1234");
        assert_eq!(reference.span, 2..9);
    }

    #[test]
    fn test_find_anchored_with_hyphen() {
        let reference = find_anchored_ticket_reference("- AB-1234-some context").unwrap();
        assert_eq!(reference.separator, Separator::Hyphen);
        assert_eq!(reference.id, "1234");
    }

    #[test]
    fn test_find_anchored_without_separator() {
        let reference = find_anchored_ticket_reference("- AB0042 - context").unwrap();
        assert_eq!(reference.separator, Separator::Absent);
        assert_eq!(reference.id, "0042");
    }

    #[test]
    fn test_find_anchored_requires_bullet() {
        assert!(find_anchored_ticket_reference("AB#1234 - no bullet").is_none());
        assert!(find_anchored_ticket_reference("This string has ticket 1234.").is_none());
    }

    // ============================================================================
    // find_ticket_references tests
    // ============================================================================

    #[test]
    fn test_find_ticket_references_multiple() {
        let references = find_ticket_references("- AB#1234, AB-2345 - context");
        let ids: Vec<&str> = references.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1234", "2345"]);
        assert_eq!(references[1].separator, Separator::Hyphen);
    }

    #[test]
    fn test_find_ticket_references_none() {
        assert!(find_ticket_references("Text with TICKET-1234 not formatted.").is_empty());
        assert!(find_ticket_references("AB# without digits").is_empty());
    }

    #[test]
    fn test_find_ticket_references_skips_existing_links() {
        let text = format!("- [AB#1234]({BASE_URL}1234), AB#2345 - context");
        let references = find_ticket_references(&text);
        assert_eq!(references.len(), 1);
        assert_eq!(references[0].id, "2345");
    }

    #[test]
    fn test_find_ticket_references_inside_words() {
        let references = find_ticket_references("- TAB#12 - x, xAB34");
        let ids: Vec<&str> = references.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["12", "34"]);
        assert_eq!(references[0].span, 3..8);
    }

    // ============================================================================
    // format_ticket_reference tests
    // ============================================================================

    #[test]
    fn test_format_ticket_reference_with_hash() {
        let input = "- AB#1234 - some context about this pr";
        let reference = find_anchored_ticket_reference(input);
        assert_eq!(
            format_ticket_reference(input, reference.as_ref(), BASE_URL),
            format!("[AB#1234]({BASE_URL}1234)")
        );
    }

    #[test]
    fn test_format_ticket_reference_with_hyphen() {
        let input = "- AB-1234-some context about this pr";
        let reference = find_anchored_ticket_reference(input);
        assert_eq!(
            format_ticket_reference(input, reference.as_ref(), BASE_URL),
            format!("[AB#1234]({BASE_URL}1234)")
        );
    }

    #[test]
    fn test_format_ticket_reference_invalid_base_url() {
        let input = "- AB#1234 - context with a ticket number.";
        let reference = find_anchored_ticket_reference(input);
        assert_eq!(
            format_ticket_reference(input, reference.as_ref(), "invalid-url"),
            input
        );
    }

    #[test]
    fn test_format_ticket_reference_unexpected_format() {
        let input = "This string has ticket 1234 not in expected format.";
        let reference = find_anchored_ticket_reference(input);
        assert_eq!(
            format_ticket_reference(input, reference.as_ref(), "https://dev.azure.com/valid-url/"),
            input
        );
    }

    #[test]
    fn test_format_ticket_reference_without_ticket() {
        let input = "This is a string without a ticket number.";
        assert_eq!(
            format_ticket_reference(input, None, "https://dev.azure.com/valid-url/"),
            input
        );
    }

    #[test]
    fn test_format_ticket_reference_keeps_leading_zeros() {
        let input = "- AB#007 - context";
        let reference = find_anchored_ticket_reference(input);
        assert_eq!(
            format_ticket_reference(input, reference.as_ref(), BASE_URL),
            format!("[AB#007]({BASE_URL}007)")
        );
    }

    #[test]
    fn test_ticket_reference_display() {
        let reference = find_anchored_ticket_reference("- AB-99 - x").unwrap();
        assert_eq!(reference.to_string(), "AB#99");
    }
}
