//! apidoc — generate API reference documents from annotated C headers.
//!
//! Scans header files for `/** ... */` blocks in front of function
//! declarations and writes, into the output directory:
//!
//! - one reference document per module (`<module>.md` or `<module>.html`),
//! - an index of all modules (`README.md` or `index.html`),
//! - a machine-readable catalog (`api-index.json`).
//!
//! With `--stdin`, a single source text is read from stdin and its reference
//! document is printed to stdout.

mod anchor;
mod model;
mod parser;
mod render;
mod scan;

use anyhow::{Context, Result};
use clap::Parser;
use render::{RenderContext, Renderer};
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Roots scanned when none are given on the command line.
const DEFAULT_ROOTS: &[&str] = &["include", "src"];

#[derive(Parser)]
#[command(
    name = "apidoc",
    about = "Generate API reference documents from annotated C headers"
)]
struct Cli {
    /// Header files, directories (searched recursively) or glob patterns.
    /// Defaults to `include` and `src`.
    roots: Vec<String>,

    /// Output directory
    #[arg(short = 'o', long, default_value = "docs/api")]
    output: PathBuf,

    /// Output format: markdown (default) or html
    #[arg(short = 'f', long, default_value = "markdown")]
    format: String,

    /// Header file extension to scan for in directories. Repeatable.
    #[arg(short = 'e', long = "ext", default_value = "h")]
    extensions: Vec<String>,

    /// Keep only entries with this tag. Prefix with ! to exclude.
    /// `deprecated` matches @deprecated entries. E.g. --filter '!deprecated'
    #[arg(long)]
    filter: Vec<String>,

    /// Leave out the generation timestamp so output is reproducible
    #[arg(long)]
    no_timestamp: bool,

    /// Read one source text from stdin and print its reference document
    #[arg(long)]
    stdin: bool,

    /// Module name used in stdin mode
    #[arg(long, requires = "stdin")]
    module: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let renderer = render::create_renderer(&cli.format)?;
    let ctx = RenderContext {
        generated: (!cli.no_timestamp).then(timestamp),
    };
    let filter = scan::TagFilter::new(&cli.filter);

    if cli.stdin {
        return stdin_mode(&cli, renderer.as_ref(), &ctx, &filter);
    }

    file_mode(&cli, renderer.as_ref(), &ctx, &filter)
}

/// Log to stderr; level from `APIDOC_LOG`, default `info`.
fn init_logging() {
    let filter = EnvFilter::try_from_env("APIDOC_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .init();
}

fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// stdin mode: parse one source text, print the module document to stdout.
fn stdin_mode(
    cli: &Cli,
    renderer: &dyn Renderer,
    ctx: &RenderContext,
    filter: &scan::TagFilter,
) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let module = cli.module.as_deref().unwrap_or("stdin");
    let mut catalog = model::Catalog::new();
    scan::add_source(&mut catalog, module, &input, "<stdin>", filter);

    let entries = catalog.entries(module).unwrap_or_default();
    print!("{}", renderer.render_module(module, entries, ctx));
    Ok(())
}

/// file mode: scan all roots, then render every document into the output directory.
fn file_mode(
    cli: &Cli,
    renderer: &dyn Renderer,
    ctx: &RenderContext,
    filter: &scan::TagFilter,
) -> Result<()> {
    let (roots, explicit) = if cli.roots.is_empty() {
        (DEFAULT_ROOTS.iter().map(|r| r.to_string()).collect(), false)
    } else {
        (cli.roots.clone(), true)
    };

    // Scan phase
    let files = scan::discover(&roots, &cli.extensions, explicit)?;
    info!(files = files.len(), "scanning headers");
    let report = scan::scan(&files, filter);
    for error in &report.errors {
        warn!(file = %error.path.display(), error = %error.message, "file contributed no entries");
    }

    // Render phase
    fs::create_dir_all(&cli.output)
        .with_context(|| format!("failed to create output directory: {}", cli.output.display()))?;
    write_documents(&report.catalog, renderer, ctx, &cli.output)?;

    info!(
        modules = report.catalog.module_count(),
        files = report.files_scanned,
        unreadable = report.errors.len(),
        total = report.catalog.total_entries(),
        "API documentation generated"
    );
    Ok(())
}

/// Write module documents, the index and the serialized catalog.
fn write_documents(
    catalog: &model::Catalog,
    renderer: &dyn Renderer,
    ctx: &RenderContext,
    output_dir: &Path,
) -> Result<()> {
    let ext = renderer.file_extension();
    let index_name = renderer.index_file_name();

    // Modules without entries get no document
    for (module, entries) in catalog.documented_modules() {
        let file_name = format!("{}.{}", module, ext);
        if file_name.eq_ignore_ascii_case(index_name) {
            warn!(module, index = index_name, "module document would overwrite the index, skipping");
            continue;
        }
        let path = output_dir.join(file_name);
        write(&path, &renderer.render_module(module, entries, ctx))?;
        info!(module, entries = entries.len(), "wrote module document");
    }

    let index_path = output_dir.join(index_name);
    write(&index_path, &renderer.render_index(catalog, ctx))?;
    info!(path = %index_path.display(), "wrote index");

    let catalog_path = output_dir.join(render::json::CATALOG_FILE_NAME);
    write(&catalog_path, &render::json::render_catalog(catalog, ctx)?)?;
    info!(path = %catalog_path.display(), "wrote catalog");

    Ok(())
}

fn write(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}
