//! AST parser wrapper using OXC

use crate::error::{ChunkerError, Result};
use crate::parsers::import_scanner::ImportScanner;
use oxc_allocator::Allocator;
use oxc_diagnostics::OxcDiagnostic;
use oxc_parser::{ParseOptions, Parser};
use oxc_span::SourceType;
use parking_lot::RwLock;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Thread-safe allocator pool for reuse across parses
pub struct AllocatorPool {
    allocators: Arc<RwLock<Vec<Allocator>>>,
}

impl AllocatorPool {
    /// Create a new allocator pool
    pub fn new(size: usize) -> Self {
        let mut allocators = Vec::with_capacity(size);
        for _ in 0..size {
            allocators.push(Allocator::default());
        }
        Self {
            allocators: Arc::new(RwLock::new(allocators)),
        }
    }

    /// Take an allocator from the pool
    pub fn take(&self) -> Option<Allocator> {
        self.allocators.write().pop()
    }

    /// Return an allocator to the pool
    pub fn return_allocator(&self, allocator: Allocator) {
        self.allocators.write().push(allocator);
    }
}

/// AST parser using OXC
pub struct ASTParser {
    parse_options: ParseOptions,
    allocator_pool: AllocatorPool,
}

impl ASTParser {
    /// Create a new AST parser
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions {
                parse_regular_expression: true,
                ..ParseOptions::default()
            },
            allocator_pool: AllocatorPool::new(num_cpus::get()),
        }
    }

    /// Parse a JavaScript file and extract its module references immediately.
    /// The AST never escapes the allocator's lifetime; only the extracted
    /// reference lists survive.
    pub fn parse_and_scan(&self, path: &Path) -> Result<FileScan> {
        let source_text = fs::read_to_string(path).map_err(ChunkerError::io_error)?;

        let source_type = SourceType::from_path(path).unwrap_or_default();

        let allocator = self.allocator_pool.take().unwrap_or_default();

        let ret = Parser::new(&allocator, &source_text, source_type)
            .with_options(self.parse_options.clone())
            .parse();

        // Process the AST immediately while the allocator is alive
        let scan = if ret.errors.is_empty() {
            let output = ImportScanner::scan(&ret.program);
            FileScan {
                path: path.to_path_buf(),
                static_refs: output.static_refs,
                dynamic_imports: output.dynamic_imports,
                uses_goog_base: output.uses_goog_base,
                ignored_dynamic_imports: output.ignored_dynamic_imports,
                has_errors: false,
                parse_errors: Vec::new(),
            }
        } else {
            FileScan::with_errors(path, &ret.errors)
        };

        self.allocator_pool.return_allocator(allocator);

        Ok(scan)
    }
}

impl Default for ASTParser {
    fn default() -> Self {
        Self::new()
    }
}

/// A static module reference found in a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaticRef {
    /// An import/export/require specifier to resolve with Node semantics
    Specifier(String),
    /// A legacy namespace to resolve through the deps mapping
    Namespace(String),
}

/// Extracted module references that do not depend on AST lifetimes
#[derive(Debug, Clone)]
pub struct FileScan {
    /// The scanned file
    pub path: PathBuf,

    /// Static references in source order
    pub static_refs: Vec<StaticRef>,

    /// String-literal dynamic import specifiers in source order
    pub dynamic_imports: Vec<String>,

    /// Whether any member expression uses the legacy `goog` object
    pub uses_goog_base: bool,

    /// Count of dynamic imports skipped because the argument was not a
    /// string literal
    pub ignored_dynamic_imports: usize,

    /// Whether the file failed to parse
    pub has_errors: bool,

    /// Parse error descriptions
    pub parse_errors: Vec<String>,
}

impl FileScan {
    /// Scan results for a file that failed to parse: empty outputs plus the
    /// recorded diagnostics
    pub fn with_errors(path: &Path, errors: &[OxcDiagnostic]) -> Self {
        Self {
            path: path.to_path_buf(),
            static_refs: Vec::new(),
            dynamic_imports: Vec::new(),
            uses_goog_base: false,
            ignored_dynamic_imports: 0,
            has_errors: true,
            parse_errors: errors.iter().map(|e| format!("{}", e)).collect(),
        }
    }
}
