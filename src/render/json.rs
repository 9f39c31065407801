//! Machine-readable catalog for tooling integration.
//!
//! Only a reduced projection of every entry is written (name, brief,
//! deprecation flag, tags); descriptions, parameters and examples stay in the
//! reference documents.

use crate::model::{ApiEntry, Catalog};
use crate::render::RenderContext;
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;

pub const CATALOG_FILE_NAME: &str = "api-index.json";

#[derive(Serialize)]
struct CatalogRecord<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    generated: Option<&'a str>,
    modules: BTreeMap<&'a str, ModuleRecord<'a>>,
    total_apis: usize,
}

#[derive(Serialize)]
struct ModuleRecord<'a> {
    count: usize,
    apis: Vec<ApiRecord<'a>>,
}

#[derive(Serialize)]
struct ApiRecord<'a> {
    name: &'a str,
    brief: &'a str,
    deprecated: bool,
    tags: &'a [String],
}

impl<'a> From<&'a ApiEntry> for ApiRecord<'a> {
    fn from(entry: &'a ApiEntry) -> Self {
        ApiRecord {
            name: &entry.name,
            brief: &entry.brief,
            deprecated: entry.deprecated,
            tags: &entry.tags,
        }
    }
}

/// Serialize the catalog as pretty-printed JSON. Modules without entries are
/// left out.
pub fn render_catalog(catalog: &Catalog, ctx: &RenderContext) -> Result<String> {
    let modules: BTreeMap<&str, ModuleRecord> = catalog
        .documented_modules()
        .map(|(module, entries)| {
            let record = ModuleRecord {
                count: entries.len(),
                apis: entries.iter().map(ApiRecord::from).collect(),
            };
            (module, record)
        })
        .collect();

    let record = CatalogRecord {
        generated: ctx.generated.as_deref(),
        total_apis: modules.values().map(|m| m.count).sum(),
        modules,
    };

    let mut out = serde_json::to_string_pretty(&record).context("failed to serialize catalog")?;
    out.push('\n');
    Ok(out)
}
