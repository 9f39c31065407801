//! HTML renderer — standalone HTML pages with semantic markup.

use crate::anchor;
use crate::model::*;
use crate::render::{count_label, summary, unindent, RenderContext, Renderer};

pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render_module(&self, module: &str, entries: &[ApiEntry], ctx: &RenderContext) -> String {
        let mut out = page_start(&format!("{} API Reference", module));

        if let Some(ref generated) = ctx.generated {
            out.push_str(&format!(
                "<p class=\"generated\">Generated from the source code. Last updated: {}</p>\n",
                html_escape(generated)
            ));
        }

        out.push_str("<h2>Overview</h2>\n");
        out.push_str(&format!(
            "<p>The {} module provides {}.</p>\n",
            html_escape(module),
            count_label(entries.len())
        ));

        out.push_str("<h2>API List</h2>\n<table>\n");
        out.push_str("<tr><th>Function</th><th>Summary</th><th>Status</th></tr>\n");
        for entry in entries {
            out.push_str(&format!(
                "<tr><td><a href=\"#{}\">{}</a></td><td>{}</td><td>{}</td></tr>\n",
                html_escape(&anchor::anchor(&entry.name)),
                html_escape(&entry.name),
                html_escape(&summary(entry)),
                entry.status().marker()
            ));
        }
        out.push_str("</table>\n");

        out.push_str("<h2>API Details</h2>\n");
        for entry in entries {
            out.push_str(&render_entry_html(entry));
        }

        out.push_str("</body>\n</html>\n");
        out
    }

    fn render_index(&self, catalog: &Catalog, _ctx: &RenderContext) -> String {
        let mut out = page_start("API Reference");
        out.push_str("<p>This is the complete API reference of the library.</p>\n");

        out.push_str("<h2>Modules</h2>\n<ul>\n");
        let mut total = 0;
        for (module, entries) in catalog.documented_modules() {
            total += entries.len();
            out.push_str(&format!(
                "  <li><a href=\"{}.{}\">{}</a> - {}</li>\n",
                html_escape(module),
                self.file_extension(),
                html_escape(module),
                count_label(entries.len())
            ));
        }
        out.push_str("</ul>\n");
        out.push_str(&format!(
            "<p><strong>Total</strong>: {}</p>\n",
            count_label(total)
        ));

        out.push_str("<h2>Usage</h2>\n<ol>\n");
        out.push_str("  <li>Click a module name to open its detailed API reference</li>\n");
        out.push_str("  <li>Use your browser's search (Ctrl+F) to find a specific API</li>\n");
        out.push_str("  <li>Every API documents its parameters and, where available, example code</li>\n");
        out.push_str("</ol>\n");

        out.push_str("<h2>Conventions</h2>\n<h3>Parameter direction markers</h3>\n<ul>\n");
        for direction in Direction::ALL {
            out.push_str(&format!(
                "  <li>{} {} ({})</li>\n",
                direction.marker(),
                direction.meaning(),
                direction.label()
            ));
        }
        out.push_str("</ul>\n<h3>Status markers</h3>\n<ul>\n");
        for status in Status::ALL {
            out.push_str(&format!(
                "  <li>{} - {}</li>\n",
                status.marker(),
                status.meaning()
            ));
        }
        out.push_str("</ul>\n");

        out.push_str("</body>\n</html>\n");
        out
    }

    fn file_extension(&self) -> &str {
        "html"
    }

    fn index_file_name(&self) -> &str {
        "index.html"
    }
}

fn page_start(title: &str) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    out.push_str("<style>\n");
    out.push_str("body { font-family: system-ui, sans-serif; max-width: 56em; margin: 2em auto; padding: 0 1em; }\n");
    out.push_str("code { background: #f4f4f4; padding: 0.15em 0.3em; border-radius: 3px; }\n");
    out.push_str("pre { background: #f4f4f4; padding: 1em; border-radius: 5px; overflow-x: auto; }\n");
    out.push_str("table { border-collapse: collapse; }\n");
    out.push_str("th, td { border: 1px solid #ddd; padding: 0.3em 0.6em; text-align: left; }\n");
    out.push_str(".deprecated { border-left: 4px solid #e0a000; padding-left: 1em; }\n");
    out.push_str(".tag { display: inline-block; font-size: 0.75em; padding: 0.1em 0.4em; border-radius: 3px; background: #e8e8e8; }\n");
    out.push_str("</style>\n");
    out.push_str("</head>\n<body>\n");
    out.push_str(&format!("<h1>{}</h1>\n", html_escape(title)));
    out
}

fn render_entry_html(entry: &ApiEntry) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "<h3 id=\"{}\">{}</h3>\n",
        html_escape(&anchor::anchor(&entry.name)),
        html_escape(&entry.name)
    ));

    if entry.deprecated {
        out.push_str("<blockquote class=\"deprecated\">⚠️ <strong>Deprecated</strong>: this API is deprecated, use its replacement instead.</blockquote>\n");
    }

    if !entry.brief.is_empty() {
        out.push_str(&format!("<p><strong>Brief</strong>: {}</p>\n", html_escape(&entry.brief)));
    }

    out.push_str(&format!(
        "<pre><code class=\"language-c\">{}</code></pre>\n",
        html_escape(&entry.signature)
    ));

    if !entry.description.is_empty() {
        out.push_str("<h4>Description</h4>\n");
        for paragraph in entry.description.split("\n\n") {
            out.push_str(&format!("<p>{}</p>\n", html_escape(paragraph)));
        }
    }

    if !entry.params.is_empty() {
        out.push_str("<h4>Parameters</h4>\n<table>\n");
        out.push_str("<tr><th>Name</th><th>Direction</th><th>Description</th></tr>\n");
        for param in &entry.params {
            out.push_str(&format!(
                "<tr><td><code>{}</code></td><td title=\"{}\">{}</td><td>{}</td></tr>\n",
                html_escape(&param.name),
                param.direction.label(),
                param.direction.marker(),
                html_escape(&param.description)
            ));
        }
        out.push_str("</table>\n");
    }

    if !entry.return_description.is_empty() {
        out.push_str("<h4>Returns</h4>\n");
        out.push_str(&format!("<p>{}</p>\n", html_escape(&entry.return_description)));
    }

    if !entry.example.is_empty() {
        out.push_str("<h4>Example</h4>\n");
        out.push_str(&format!(
            "<pre><code class=\"language-c\">{}</code></pre>\n",
            html_escape(&unindent(&entry.example))
        ));
    }

    if !entry.notes.is_empty() {
        out.push_str("<h4>Notes</h4>\n<ul>\n");
        for note in &entry.notes {
            out.push_str(&format!("  <li>{}</li>\n", html_escape(note)));
        }
        out.push_str("</ul>\n");
    }

    if !entry.since_version.is_empty() {
        out.push_str(&format!(
            "<p><strong>Since</strong>: {}</p>\n",
            html_escape(&entry.since_version)
        ));
    }

    if !entry.tags.is_empty() {
        out.push_str("<p><strong>Tags</strong>:");
        for tag in &entry.tags {
            out.push_str(&format!(" <span class=\"tag\">{}</span>", html_escape(tag)));
        }
        out.push_str("</p>\n");
    }

    out.push_str(&format!(
        "<p><strong>Source</strong>: <code>{}</code></p>\n<hr>\n",
        html_escape(&entry.source_file)
    ));
    out
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> ApiEntry {
        ApiEntry {
            name: "Fifo_Put".to_string(),
            signature: "int Fifo_Put(fifo_t *f, const uint8_t *data)".to_string(),
            brief: "Write bytes.".to_string(),
            params: vec![Param {
                name: "f".to_string(),
                direction: Direction::InOut,
                description: "fifo".to_string(),
            }],
            deprecated: true,
            tags: vec!["io".to_string()],
            source_file: "include/fifo.h".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn module_page() {
        let doc = HtmlRenderer.render_module("fifo", &[entry()], &RenderContext::default());
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>fifo API Reference</title>"));
        assert!(doc.contains("<a href=\"#fifo_put\">Fifo_Put</a>"));
        assert!(doc.contains("<h3 id=\"fifo_put\">Fifo_Put</h3>"));
        assert!(doc.contains("const uint8_t *data"));
        assert!(doc.contains("<td title=\"inout\">🔄</td>"));
        assert!(doc.contains("class=\"deprecated\""));
        assert!(doc.contains("<td>⚠️ Deprecated</td>"));
        assert!(!doc.contains("Last updated"));
    }

    #[test]
    fn escapes_signature() {
        let e = ApiEntry {
            signature: "vec<int> make(void)".to_string(),
            ..entry()
        };
        let doc = HtmlRenderer.render_module("m", &[e], &RenderContext::default());
        assert!(doc.contains("vec&lt;int&gt; make(void)"));
    }

    #[test]
    fn index_page() {
        let mut catalog = Catalog::new();
        catalog.push("fifo", entry());
        let doc = HtmlRenderer.render_index(&catalog, &RenderContext::default());
        assert!(doc.contains("<a href=\"fifo.html\">fifo</a> - 1 API function"));
        assert!(doc.contains("🔧 Experimental"));
        assert!(doc.contains("📤 Output parameter (out)"));
    }
}
