//! Carrier response lookup helpers.
//!
//! Both services are loose with shapes: tag casing varies by operation,
//! result payloads arrive entity-escaped or CDATA-wrapped, and field names
//! differ between account configurations. These helpers do all tag
//! matching ASCII case-insensitively and ignore namespace prefixes.

use roxmltree::{Document, Node};

/// Text content of the first element named `tag`, trimmed.
///
/// Concatenates all direct text children, so payloads split across an
/// escaped part and a CDATA part still come back whole. Returns `None`
/// when the element is absent or its text is empty.
pub(crate) fn element_text(doc: &Document<'_>, tag: &str) -> Option<String> {
    doc.descendants()
        .find(|node| node.is_element() && node.tag_name().name().eq_ignore_ascii_case(tag))
        .and_then(|node| non_empty_text(&node))
}

/// First alias, in priority order, that resolves to a non-empty element.
pub(crate) fn first_text_by_priority(doc: &Document<'_>, tags: &[String]) -> Option<String> {
    tags.iter().find_map(|tag| element_text(doc, tag))
}

/// Last-resort scan: first leaf element whose tag name, upper-cased,
/// contains one of the fragments. Returns the matched tag name with the
/// value so callers can log which alias fallback fired.
pub(crate) fn scan_leaves(doc: &Document<'_>, fragments: &[String]) -> Option<(String, String)> {
    doc.descendants().find_map(|node| {
        if !node.is_element() || node.children().any(|c| c.is_element()) {
            return None;
        }
        let name = node.tag_name().name();
        let upper = name.to_uppercase();
        if fragments.iter().any(|f| upper.contains(&f.to_uppercase())) {
            non_empty_text(&node).map(|value| (name.to_owned(), value))
        } else {
            None
        }
    })
}

fn non_empty_text(node: &Node<'_, '_>) -> Option<String> {
    let text: String = node
        .children()
        .filter_map(|c| if c.is_text() { c.text() } else { None })
        .collect();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
