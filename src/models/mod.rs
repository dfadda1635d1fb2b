//! Data models and structures for the chunk calculator

pub mod chunk;
pub mod config;
pub mod graph;
pub mod output;

pub use chunk::{ChunkNode, EntryPoint, FileDepInfo, ManualEntryPoint};
pub use config::{NameStyle, OutputFormat, PartialSettings, Settings};
pub use graph::{ChunkDependencyGraph, LoadOrderGraph};
pub use output::{ChunkSpec, ChunkSummary, Diagnostic};
