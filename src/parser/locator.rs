//! Doc-comment block locator.
//!
//! Pairs every `/** ... */` block with the declaration text that follows it,
//! up to and including the first `;` or `{`. Matching is leftmost and
//! non-overlapping, so a comment is always paired with the *next* terminator,
//! even when another comment block sits in between:
//!
//! ```text
//! /** A */
//! /** B */
//! int f(void);
//! ```
//!
//! yields one pair: comment `A` with declaration `/** B */\nint f(void);`.

use regex::Regex;
use std::sync::LazyLock;

static RE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*\*(.*?)\*/\s*([^;{]+[;{])").unwrap());

/// One comment/declaration pair, borrowed from the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    /// Text between `/**` and `*/`.
    pub comment: &'a str,
    /// Declaration text including its terminator.
    pub declaration: &'a str,
}

/// Lazily scan `content` for comment/declaration pairs.
pub fn locate(content: &str) -> impl Iterator<Item = Block<'_>> {
    RE_BLOCK.captures_iter(content).map(|caps| {
        let (_, [comment, declaration]) = caps.extract();
        Block {
            comment,
            declaration,
        }
    })
}
