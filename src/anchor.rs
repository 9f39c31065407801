//! Heading anchors for function names.
//!
//! C identifiers keep their underscores, so the anchor is the lowercased name
//! with every character that is not alphanumeric, `_` or `-` removed.

/// Anchor id for a function heading.
pub fn anchor(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

/// Markdown link to the heading of a function in the same document.
pub fn anchor_link(name: &str) -> String {
    format!("[{}](#{})", name, anchor(name))
}
