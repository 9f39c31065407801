//! Renderer module — trait-based format dispatch.
//!
//! Renderers are pure: the same catalog and context always produce the same
//! text. The only varying input is [`RenderContext::generated`].

pub mod html;
pub mod json;
pub mod markdown;

use crate::model::{ApiEntry, Catalog};
use anyhow::{anyhow, Result};

/// Number of description characters shown when an entry has no brief.
const SUMMARY_CHARS: usize = 50;

/// Inputs shared by every rendered document.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    /// Timestamp line for module documents and the catalog, if any.
    pub generated: Option<String>,
}

/// Trait for rendering the catalog into a specific document format.
pub trait Renderer {
    /// Reference document for one module.
    fn render_module(&self, module: &str, entries: &[ApiEntry], ctx: &RenderContext) -> String;
    /// Index of all modules that have entries.
    fn render_index(&self, catalog: &Catalog, ctx: &RenderContext) -> String;
    fn file_extension(&self) -> &str;
    fn index_file_name(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        "html" => Ok(Box::new(html::HtmlRenderer)),
        _ => Err(anyhow!(
            "unknown format: {}. Use markdown or html",
            format
        )),
    }
}

/// Summary column text: the brief, else the start of the description, else a
/// placeholder.
pub fn summary(entry: &ApiEntry) -> String {
    if !entry.brief.is_empty() {
        return entry.brief.clone();
    }
    if entry.description.is_empty() {
        return "No description".to_string();
    }
    let mut chars = entry.description.chars();
    let head: String = chars.by_ref().take(SUMMARY_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

/// "1 API function" / "3 API functions".
pub fn count_label(n: usize) -> String {
    if n == 1 {
        "1 API function".to_string()
    } else {
        format!("{} API functions", n)
    }
}

/// Remove common leading indentation from a multi-line string.
pub fn unindent(text: &str) -> String {
    let min_indent = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start_matches(' ').len())
        .min()
        .unwrap_or(0);

    text.lines()
        .map(|l| l.get(min_indent..).unwrap_or_else(|| l.trim_start()))
        .collect::<Vec<_>>()
        .join("\n")
}
