//! Core graph pipeline: walking, chunk-graph construction, normalization,
//! projection, and emission

pub mod ancestry;
pub mod calculator;
pub mod context;
pub mod emitter;
pub mod graph_builder;
pub mod normalizer;
pub mod projector;
pub mod walker;

pub use ancestry::AncestorEngine;
pub use calculator::{CalculationOutcome, ChunkCalculator};
pub use context::BuildContext;
pub use emitter::FlagEmitter;
pub use graph_builder::ChunkGraphBuilder;
pub use walker::HoistMap;
