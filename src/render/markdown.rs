//! GitHub-flavored markdown renderer.
//!
//! Module documents open with a summary table linking to one detailed section
//! per function; the index lists modules and explains the markers.

use crate::anchor;
use crate::model::*;
use crate::render::{count_label, summary, unindent, RenderContext, Renderer};

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render_module(&self, module: &str, entries: &[ApiEntry], ctx: &RenderContext) -> String {
        let mut lines: Vec<String> = Vec::new();

        lines.push(format!("# {} API Reference\n", module));
        if let Some(ref generated) = ctx.generated {
            lines.push(format!(
                "This document is generated from the source code. Last updated: {}\n",
                generated
            ));
        }

        lines.push("## Overview\n".to_string());
        lines.push(format!(
            "The {} module provides {}:\n",
            module,
            count_label(entries.len())
        ));

        // Summary table
        lines.push("## API List\n".to_string());
        lines.push("| Function | Summary | Status |".to_string());
        lines.push("|----------|---------|--------|".to_string());
        for entry in entries {
            lines.push(format!(
                "| {} | {} | {} |",
                anchor::anchor_link(&entry.name),
                cell(&summary(entry)),
                entry.status().marker()
            ));
        }
        lines.push(String::new());

        lines.push("## API Details\n".to_string());
        for entry in entries {
            render_entry(&mut lines, entry);
        }

        // every section already ends with a blank line
        lines.join("\n")
    }

    fn render_index(&self, catalog: &Catalog, _ctx: &RenderContext) -> String {
        let mut lines: Vec<String> = Vec::new();

        lines.push("# API Reference\n".to_string());
        lines.push("This is the complete API reference of the library.\n".to_string());

        lines.push("## Modules\n".to_string());
        let mut total = 0;
        for (module, entries) in catalog.documented_modules() {
            total += entries.len();
            lines.push(format!(
                "- [{}]({}.{}) - {}",
                module,
                module,
                self.file_extension(),
                count_label(entries.len())
            ));
        }
        lines.push(String::new());
        lines.push(format!("**Total**: {}\n", count_label(total)));

        lines.push("## Usage\n".to_string());
        lines.push("1. Click a module name to open its detailed API reference".to_string());
        lines.push("2. Use your browser's search (Ctrl+F) to find a specific API".to_string());
        lines.push(
            "3. Every API documents its parameters and, where available, example code\n"
                .to_string(),
        );

        lines.push("## Conventions\n".to_string());
        lines.push("### Parameter direction markers\n".to_string());
        for direction in Direction::ALL {
            lines.push(format!(
                "- {} {} ({})",
                direction.marker(),
                direction.meaning(),
                direction.label()
            ));
        }
        lines.push(String::new());
        lines.push("### Status markers\n".to_string());
        for status in Status::ALL {
            lines.push(format!("- {} - {}", status.marker(), status.meaning()));
        }

        let mut output = lines.join("\n");
        output.push('\n');
        output
    }

    fn file_extension(&self) -> &str {
        "md"
    }

    fn index_file_name(&self) -> &str {
        "README.md"
    }
}

/// Render the detailed section of one function.
fn render_entry(lines: &mut Vec<String>, entry: &ApiEntry) {
    lines.push(format!("### {}\n", entry.name));

    if entry.deprecated {
        lines.push(
            "> ⚠️ **Deprecated**: this API is deprecated, use its replacement instead.\n"
                .to_string(),
        );
    }

    if !entry.brief.is_empty() {
        lines.push(format!("**Brief**: {}\n", entry.brief));
    }

    lines.push("**Signature**:".to_string());
    lines.push("```c".to_string());
    lines.push(entry.signature.clone());
    lines.push("```\n".to_string());

    if !entry.description.is_empty() {
        lines.push("**Description**:\n".to_string());
        lines.push(format!("{}\n", entry.description));
    }

    if !entry.params.is_empty() {
        lines.push("**Parameters**:\n".to_string());
        lines.push("| Name | Direction | Description |".to_string());
        lines.push("|------|-----------|-------------|".to_string());
        for param in &entry.params {
            lines.push(format!(
                "| {} | {} | {} |",
                param.name,
                param.direction.marker(),
                cell(&param.description)
            ));
        }
        lines.push(String::new());
    }

    if !entry.return_description.is_empty() {
        lines.push("**Returns**:\n".to_string());
        lines.push(format!("{}\n", entry.return_description));
    }

    if !entry.example.is_empty() {
        lines.push("**Example**:".to_string());
        lines.push("```c".to_string());
        lines.push(unindent(&entry.example));
        lines.push("```\n".to_string());
    }

    if !entry.notes.is_empty() {
        lines.push("**Notes**:\n".to_string());
        for note in &entry.notes {
            lines.push(format!("- {}", note));
        }
        lines.push(String::new());
    }

    if !entry.since_version.is_empty() {
        lines.push(format!("**Since**: {}\n", entry.since_version));
    }

    if !entry.tags.is_empty() {
        let tags: Vec<String> = entry.tags.iter().map(|t| format!("`{}`", t)).collect();
        lines.push(format!("**Tags**: {}\n", tags.join(", ")));
    }

    lines.push(format!("**Source**: `{}`\n", entry.source_file));
    lines.push("---\n".to_string());
}

/// Make text safe for a single table cell.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
