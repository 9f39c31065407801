//! Data model for extracted API documentation, independent of output format.

use std::collections::BTreeMap;

/// A single documented function.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiEntry {
    /// Identifier taken from the declaration; never empty.
    pub name: String,
    /// Declaration text without the trailing `;` or `{`.
    pub signature: String,
    /// @brief, or the first line of the leading free text
    pub brief: String,
    pub description: String,
    /// @param entries in order of appearance
    pub params: Vec<Param>,
    /// @return (last one wins)
    pub return_description: String,
    /// Lines following @example, indentation preserved
    pub example: String,
    /// @note entries
    pub notes: Vec<String>,
    /// @since (last one wins)
    pub since_version: String,
    pub deprecated: bool,
    /// @tag entries, duplicates kept
    pub tags: Vec<String>,
    /// Originating file, attached by the scan
    pub source_file: String,
}

impl ApiEntry {
    /// Status shown in reference tables and the index.
    pub fn status(&self) -> Status {
        if self.deprecated {
            Status::Deprecated
        } else {
            Status::Normal
        }
    }
}

/// Parsed @param entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub direction: Direction,
    pub description: String,
}

/// Data flow of a parameter.
///
/// The parser only produces `In` (bare name) and `InOut` (`[name]`). `Out`
/// exists so that the legend and the marker lookup stay complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    In,
    Out,
    InOut,
}

impl Direction {
    pub fn marker(self) -> &'static str {
        match self {
            Direction::In => "📥",
            Direction::Out => "📤",
            Direction::InOut => "🔄",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
            Direction::InOut => "inout",
        }
    }

    pub fn meaning(self) -> &'static str {
        match self {
            Direction::In => "Input parameter",
            Direction::Out => "Output parameter",
            Direction::InOut => "Input/output parameter",
        }
    }

    /// Every direction, in legend order.
    pub const ALL: [Direction; 3] = [Direction::In, Direction::Out, Direction::InOut];
}

/// Lifecycle status of an entry.
///
/// Entries are either `Normal` or `Deprecated`; `Experimental` is only listed
/// in the legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Normal,
    Deprecated,
    Experimental,
}

impl Status {
    pub fn marker(self) -> &'static str {
        match self {
            Status::Normal => "✅ Normal",
            Status::Deprecated => "⚠️ Deprecated",
            Status::Experimental => "🔧 Experimental",
        }
    }

    pub fn meaning(self) -> &'static str {
        match self {
            Status::Normal => "the API is stable and available",
            Status::Deprecated => "the API is deprecated, prefer its replacement",
            Status::Experimental => "the API is experimental and may change",
        }
    }

    /// Every status, in legend order.
    pub const ALL: [Status; 3] = [Status::Normal, Status::Deprecated, Status::Experimental];
}

/// All entries of a run, grouped by module.
///
/// Entries can only be appended; nothing hands out mutable access to an
/// inserted entry. Modules iterate in name order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Catalog {
    modules: BTreeMap<String, Vec<ApiEntry>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module without adding entries to it.
    pub fn ensure_module(&mut self, module: &str) {
        if !self.modules.contains_key(module) {
            self.modules.insert(module.to_string(), Vec::new());
        }
    }

    pub fn push(&mut self, module: &str, entry: ApiEntry) {
        self.modules
            .entry(module.to_string())
            .or_default()
            .push(entry);
    }

    /// All modules, including those without entries.
    pub fn modules(&self) -> impl Iterator<Item = (&str, &[ApiEntry])> {
        self.modules
            .iter()
            .map(|(name, entries)| (name.as_str(), entries.as_slice()))
    }

    /// Modules that have at least one entry.
    pub fn documented_modules(&self) -> impl Iterator<Item = (&str, &[ApiEntry])> {
        self.modules().filter(|(_, entries)| !entries.is_empty())
    }

    pub fn entries(&self, module: &str) -> Option<&[ApiEntry]> {
        self.modules.get(module).map(Vec::as_slice)
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    pub fn total_entries(&self) -> usize {
        self.modules.values().map(Vec::len).sum()
    }
}
