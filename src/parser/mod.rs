//! Locate doc-comment blocks and turn them into entries.

pub mod comment;
pub mod locator;

use crate::model::ApiEntry;
use tracing::debug;

/// Parse all documented functions of one source file.
///
/// Blocks whose declaration has no function name are dropped without error.
pub fn parse_file(content: &str, source_file: &str) -> Vec<ApiEntry> {
    let mut entries = Vec::new();
    for block in locator::locate(content) {
        match comment::parse(block.comment, block.declaration) {
            Some(mut entry) => {
                entry.source_file = source_file.to_string();
                entries.push(entry);
            }
            None => debug!(
                file = source_file,
                declaration = comment::clean_declaration(block.declaration),
                "skipping block without function name"
            ),
        }
    }
    entries
}
