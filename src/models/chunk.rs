//! Chunk data structures

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A node in the load-order graph
///
/// `name` doubles as the node's identity and the file path of the chunk's
/// entry file. `sources` is the authoritative ordered list; once finalized it
/// is a valid single-file load order with `name` as the last element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkNode {
    /// The chunk's identity: the file path of its entry file
    pub name: PathBuf,

    /// Source files included in this chunk, dependencies before dependents
    pub sources: Vec<PathBuf>,

    /// Static dependencies the entry file transitively pulls in; a superset
    /// consulted when projecting the dependency graph
    pub deps: Vec<PathBuf>,

    /// Entry points of chunks this chunk dynamically imports
    pub child_chunks: Vec<PathBuf>,
}

impl ChunkNode {
    /// Create an empty chunk for the given entry file
    pub fn new(name: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            sources: Vec::new(),
            deps: Vec::new(),
            child_chunks: Vec::new(),
        }
    }

    /// Append a source, keeping insertion order and uniqueness
    pub fn push_source(&mut self, source: PathBuf) {
        if !self.sources.contains(&source) {
            self.sources.push(source);
        }
    }

    /// Append a static dependency, keeping insertion order and uniqueness
    pub fn push_dep(&mut self, dep: PathBuf) {
        if !self.deps.contains(&dep) {
            self.deps.push(dep);
        }
    }

    /// Append a dynamically imported child chunk entry
    pub fn push_child_chunk(&mut self, child: PathBuf) {
        if !self.child_chunks.contains(&child) {
            self.child_chunks.push(child);
        }
    }

    /// Whether this chunk owns the given source file
    pub fn owns_source(&self, source: &Path) -> bool {
        self.sources.iter().any(|s| s == source)
    }
}

/// Result of walking the static dependency closure of a single file
#[derive(Debug, Clone, Default)]
pub struct FileDepInfo {
    /// The originating file
    pub file: PathBuf,

    /// Transitive static dependencies, each exactly once, dependencies
    /// before dependents; the originating file is the last element
    pub deps: Vec<PathBuf>,

    /// Dynamic-import targets observed anywhere in the closure
    pub child_chunks: Vec<PathBuf>,
}

/// A discovery starting point: a chunk name plus the files walked into it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    /// Chunk identity; also the chunk's entry file
    pub name: PathBuf,

    /// Files whose dependency closures seed the chunk
    pub files: Vec<PathBuf>,
}

impl EntryPoint {
    /// An entry point whose only file is the chunk entry itself
    pub fn from_file(name: impl Into<PathBuf>) -> Self {
        let name = name.into();
        Self {
            files: vec![name.clone()],
            name,
        }
    }
}

/// A manually attached chunk, placed under an explicit parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualEntryPoint {
    /// Name of the chunk the child attaches beneath
    pub parent: PathBuf,

    /// The chunk to create
    pub child: EntryPoint,
}
