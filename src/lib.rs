//! Chunker - output-chunk calculation for a whole-program JavaScript optimizer
//!
//! This library discovers the transitive set of source files reachable from a
//! set of entry points, partitions them into chunks at dynamic-import
//! boundaries, hoists shared sources into their lowest common ancestor, and
//! emits a chunk dependency specification plus a load-ordered source list.

#![feature(error_generic_member_access)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod output;
pub mod parsers;
pub mod utils;

// Re-export commonly used types
pub use crate::core::{CalculationOutcome, ChunkCalculator};
pub use error::{ChunkerError, ErrorSeverity, Result};
pub use models::{
    chunk::{ChunkNode, EntryPoint, FileDepInfo, ManualEntryPoint},
    config::Settings,
    output::{ChunkSpec, ChunkSummary, Diagnostic},
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
