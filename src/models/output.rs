//! Output data structures

use crate::error::ErrorSeverity;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One emitted chunk, in topological order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkSummary {
    /// Mapped chunk name used in the flag string
    pub name: String,

    /// The chunk's entry file
    pub entry: PathBuf,

    /// Number of source files in the chunk
    pub source_count: usize,

    /// Mapped names of the chunk's parents; empty for the primary entry
    pub parents: Vec<String>,
}

/// The computed chunk specification
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChunkSpec {
    /// Chunk descriptions in emission order (root first)
    pub chunks: Vec<ChunkSummary>,

    /// `--chunk` flag strings, one per chunk, in emission order
    pub chunk_flags: Vec<String>,

    /// All chunks' sources concatenated in emission order
    pub sources: Vec<PathBuf>,
}

/// A non-fatal condition observed during calculation
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// How serious the condition is
    pub severity: ErrorSeverity,

    /// Human-readable description naming the offending file
    pub message: String,
}

impl Diagnostic {
    /// Create a warning diagnostic
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: ErrorSeverity::Warning,
            message: message.into(),
        }
    }

    /// Create an error diagnostic
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: ErrorSeverity::Error,
            message: message.into(),
        }
    }
}
