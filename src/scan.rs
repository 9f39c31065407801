//! Scan phase — discover header files, parse them and fill the catalog.
//!
//! A file that cannot be read is recorded in [`ScanReport::errors`] and
//! contributes no entries; the scan carries on with the remaining files.

use crate::model::{ApiEntry, Catalog};
use crate::parser;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// Outcome of a scan: the filled catalog plus the files that failed.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub catalog: Catalog,
    pub errors: Vec<FileError>,
    pub files_scanned: usize,
}

/// A file that could not be read.
#[derive(Debug)]
pub struct FileError {
    pub path: PathBuf,
    pub message: String,
}

/// Entry filter built from `--filter` values.
///
/// `tag` keeps only entries carrying the tag, `!tag` drops entries carrying
/// it. The pseudo-tag `deprecated` matches the deprecation flag.
#[derive(Debug, Default, Clone)]
pub struct TagFilter {
    include: Vec<String>,
    exclude: Vec<String>,
}

impl TagFilter {
    pub fn new(filters: &[String]) -> Self {
        let mut filter = TagFilter::default();
        for f in filters {
            match f.strip_prefix('!') {
                Some(tag) => filter.exclude.push(tag.to_string()),
                None => filter.include.push(f.clone()),
            }
        }
        filter
    }

    pub fn keeps(&self, entry: &ApiEntry) -> bool {
        let has = |tag: &str| {
            (tag == "deprecated" && entry.deprecated) || entry.tags.iter().any(|t| t == tag)
        };
        self.include.iter().all(|tag| has(tag.as_str()))
            && !self.exclude.iter().any(|tag| has(tag.as_str()))
    }
}

/// Expand roots into a sorted, de-duplicated list of header files.
///
/// A root is a file, a directory (searched recursively for `extensions`) or a
/// glob pattern. Roots that match nothing are reported when `warn_missing`.
pub fn discover(roots: &[String], extensions: &[String], warn_missing: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for root in roots {
        let path = Path::new(root);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }

        let patterns: Vec<String> = if path.is_dir() {
            let base = glob::Pattern::escape(root.trim_end_matches('/'));
            extensions
                .iter()
                .map(|ext| format!("{}/**/*.{}", base, ext.trim_start_matches('.')))
                .collect()
        } else {
            vec![root.clone()]
        };

        let mut matched = 0;
        for pattern in &patterns {
            let paths = glob::glob(pattern)
                .with_context(|| format!("invalid glob pattern: {}", pattern))?;
            for p in paths.filter_map(|r| r.ok()).filter(|p| p.is_file()) {
                files.push(p);
                matched += 1;
            }
        }
        if matched == 0 && warn_missing {
            warn!(root = %root, "no files matched");
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// Module a header belongs to.
///
/// `include/<module>[.h]/...` and `src/<module>[.h]/...` name the module by
/// the component after `include` or `src`; anything else uses the file stem.
pub fn module_name(path: &Path) -> String {
    let parts: Vec<&str> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect();

    for marker in ["include", "src"] {
        if let Some(idx) = parts.iter().position(|p| *p == marker) {
            if let Some(next) = parts.get(idx + 1) {
                return if idx + 2 == parts.len() {
                    stem(next)
                } else {
                    next.to_string()
                };
            }
        }
    }

    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

fn stem(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => file_name.to_string(),
    }
}

/// Display form of a path, always with `/` separators.
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Parse one source text into `module`, returning the number of entries kept.
pub fn add_source(
    catalog: &mut Catalog,
    module: &str,
    content: &str,
    source_file: &str,
    filter: &TagFilter,
) -> usize {
    catalog.ensure_module(module);
    let mut kept = 0;
    for entry in parser::parse_file(content, source_file) {
        if filter.keeps(&entry) {
            catalog.push(module, entry);
            kept += 1;
        }
    }
    kept
}

/// Read and parse every file into a fresh catalog.
pub fn scan(files: &[PathBuf], filter: &TagFilter) -> ScanReport {
    let mut report = ScanReport::default();
    for path in files {
        report.files_scanned += 1;
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(file = %path.display(), error = %e, "skipping unreadable file");
                report.errors.push(FileError {
                    path: path.clone(),
                    message: e.to_string(),
                });
                continue;
            }
        };

        let module = module_name(path);
        let source_file = display_path(path);
        let kept = add_source(&mut report.catalog, &module, &content, &source_file, filter);
        debug!(file = %source_file, module = %module, entries = kept, "scanned");
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tagged(tags: &[&str], deprecated: bool) -> ApiEntry {
        ApiEntry {
            name: "f".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            deprecated,
            ..Default::default()
        }
    }

    #[test]
    fn module_from_include_file() {
        assert_eq!(module_name(Path::new("include/ek_list.h")), "ek_list");
        assert_eq!(module_name(Path::new("lib/include/ek_list.h")), "ek_list");
    }

    #[test]
    fn module_from_include_subdirectory() {
        assert_eq!(module_name(Path::new("include/net/tcp.h")), "net");
    }

    #[test]
    fn module_from_src_directory() {
        assert_eq!(module_name(Path::new("src/mempool/pool.h")), "mempool");
        assert_eq!(module_name(Path::new("src/timer.h")), "timer");
    }

    #[test]
    fn include_takes_precedence_over_src() {
        assert_eq!(module_name(Path::new("src/include/fifo.h")), "fifo");
    }

    #[test]
    fn module_falls_back_to_stem() {
        assert_eq!(module_name(Path::new("headers/ek_fifo.h")), "ek_fifo");
        assert_eq!(module_name(Path::new("ek_fifo.h")), "ek_fifo");
    }

    #[test]
    fn filter_default_keeps_everything() {
        let filter = TagFilter::new(&[]);
        assert!(filter.keeps(&tagged(&[], false)));
        assert!(filter.keeps(&tagged(&["x"], true)));
    }

    #[test]
    fn filter_include_and_exclude() {
        let filter = TagFilter::new(&["core".to_string(), "!slow".to_string()]);
        assert!(filter.keeps(&tagged(&["core"], false)));
        assert!(!filter.keeps(&tagged(&["core", "slow"], false)));
        assert!(!filter.keeps(&tagged(&["other"], false)));
    }

    #[test]
    fn filter_deprecated_pseudo_tag() {
        let filter = TagFilter::new(&["!deprecated".to_string()]);
        assert!(filter.keeps(&tagged(&[], false)));
        assert!(!filter.keeps(&tagged(&[], true)));
    }

    #[test]
    fn add_source_registers_empty_module() {
        let mut catalog = Catalog::new();
        let kept = add_source(&mut catalog, "cfg", "int x;", "cfg.h", &TagFilter::default());
        assert_eq!(kept, 0);
        assert_eq!(catalog.entries("cfg"), Some(&[][..]));
    }

    #[test]
    fn discover_directory_recursively() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("net")).unwrap();
        fs::write(dir.path().join("a.h"), "").unwrap();
        fs::write(dir.path().join("net/b.h"), "").unwrap();
        fs::write(dir.path().join("net/b.c"), "").unwrap();

        let root = dir.path().to_string_lossy().to_string();
        let files = discover(&[root], &["h".to_string()], true).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(names, [PathBuf::from("a.h"), PathBuf::from("net/b.h")]);
    }

    #[test]
    fn discover_missing_root_is_empty() {
        let files = discover(&["does/not/exist".to_string()], &["h".to_string()], false).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn scan_records_unreadable_files_and_continues() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.h");
        fs::write(&good, "/** Hi. */\nvoid hi(void);\n").unwrap();
        let missing = dir.path().join("missing.h");

        let report = scan(&[missing.clone(), good], &TagFilter::default());
        assert_eq!(report.files_scanned, 2);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].path, missing);
        assert_eq!(report.catalog.total_entries(), 1);
        assert_eq!(report.catalog.entries("good").unwrap()[0].name, "hi");
    }

    #[test]
    fn scan_skips_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let bad = dir.path().join("bad.h");
        fs::write(&bad, [0xff, 0xfe, 0x00]).unwrap();

        let report = scan(&[bad], &TagFilter::default());
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.catalog.module_count(), 0);
    }
}
