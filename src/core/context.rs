//! Per-build state
//!
//! All caches, configuration, and the legacy-namespace map are threaded
//! through a single `BuildContext`; nothing is process-wide. The per-file
//! cache is scoped to one full build, which may span two graph-construction
//! passes.

use crate::error::Result;
use crate::models::config::Settings;
use crate::models::output::Diagnostic;
use crate::parsers::{ASTParser, GoogDepsParser};
use crate::utils::PathResolver;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Direct (non-transitive) scan results for a single file
#[derive(Debug, Clone, Default)]
pub struct FileRecord {
    /// Resolved static dependencies, in source order, deduplicated
    pub static_deps: Vec<PathBuf>,

    /// Resolved dynamic-import targets, in source order, deduplicated
    pub child_chunks: Vec<PathBuf>,
}

/// State shared across one full build
pub struct BuildContext {
    /// Module resolver (C1)
    pub resolver: PathResolver,

    /// Source file parser
    pub parser: ASTParser,

    /// The legacy runtime base file, when configured
    pub goog_base: Option<PathBuf>,

    /// Namespace to absolute path mapping from deps files and extra pairs
    pub goog_deps: HashMap<String, PathBuf>,

    /// Per-file direct scan cache
    pub file_cache: HashMap<PathBuf, FileRecord>,

    /// Non-fatal conditions observed so far
    pub diagnostics: Vec<Diagnostic>,
}

impl BuildContext {
    /// Create a context from settings, parsing any configured deps files
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let mut goog_deps = HashMap::new();
        for deps_file in &settings.deps_files {
            let parsed = GoogDepsParser::parse_file(deps_file, &settings.base_directory)?;
            goog_deps.extend(parsed);
        }
        for extra in &settings.extra_deps {
            goog_deps.insert(extra.namespace.clone(), extra.path.clone());
        }

        Ok(Self {
            resolver: PathResolver::new(settings.package_json_entry_names.clone()),
            parser: ASTParser::new(),
            goog_base: settings.goog_base_path.clone(),
            goog_deps,
            file_cache: HashMap::new(),
            diagnostics: Vec::new(),
        })
    }

    /// A context with no legacy-namespace support
    pub fn bare() -> Self {
        Self {
            resolver: PathResolver::new(
                crate::models::config::DEFAULT_PACKAGE_JSON_ENTRY_NAMES
                    .iter()
                    .map(|s| (*s).to_string())
                    .collect(),
            ),
            parser: ASTParser::new(),
            goog_base: None,
            goog_deps: HashMap::new(),
            file_cache: HashMap::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Look up the cached direct record for a file
    pub fn cached_record(&self, file: &Path) -> Option<&FileRecord> {
        self.file_cache.get(file)
    }

    /// Drain collected diagnostics
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}
