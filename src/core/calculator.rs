//! Pipeline orchestration
//!
//! Runs discovery, normalization (two passes when hoisting occurred),
//! projection, and emission over one build context.

use crate::core::context::BuildContext;
use crate::core::emitter::FlagEmitter;
use crate::core::graph_builder::ChunkGraphBuilder;
use crate::core::normalizer::normalize;
use crate::core::projector::project;
use crate::core::walker::HoistMap;
use crate::error::Result;
use crate::models::chunk::{EntryPoint, ManualEntryPoint};
use crate::models::config::Settings;
use crate::models::output::{ChunkSpec, Diagnostic};

/// Result of a full calculation
#[derive(Debug)]
pub struct CalculationOutcome {
    /// The chunk specification
    pub spec: ChunkSpec,

    /// Non-fatal conditions observed during the run
    pub diagnostics: Vec<Diagnostic>,

    /// Whether any chunk's entry file was missing from its own sources;
    /// output is still produced but the process must exit with error status
    pub entrypoint_missing: bool,
}

/// Whole-pipeline driver
pub struct ChunkCalculator {
    settings: Settings,
}

impl ChunkCalculator {
    /// Create a calculator for the given settings
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Run the full pipeline
    pub fn calculate(&self) -> Result<CalculationOutcome> {
        let mut ctx = BuildContext::from_settings(&self.settings)?;

        let entrypoints: Vec<EntryPoint> = self
            .settings
            .entrypoints
            .iter()
            .map(|path| EntryPoint::from_file(path.clone()))
            .collect();
        let manual_entrypoints: Vec<ManualEntryPoint> = self
            .settings
            .manual_entrypoints
            .iter()
            .map(|manual| ManualEntryPoint {
                parent: manual.parent.clone(),
                child: EntryPoint::from_file(manual.name.clone()),
            })
            .collect();

        self.progress("discovering dependencies");
        let empty_hoists = HoistMap::new();
        let mut graph =
            ChunkGraphBuilder::build(&mut ctx, &entrypoints, &manual_entrypoints, &empty_hoists)?;

        self.progress("normalizing chunk ownership");
        let hoists = normalize(&mut graph);

        // The second pass reflects final chunk membership; this is not a
        // loop to a fixed point.
        if !hoists.is_empty() {
            self.progress("rebuilding with hoisted sources");
            graph = ChunkGraphBuilder::build(&mut ctx, &entrypoints, &manual_entrypoints, &hoists)?;
            let _ = normalize(&mut graph);
        }

        self.progress("projecting dependency graph");
        let dep_graph = project(&graph)?;

        self.progress("emitting chunk flags");
        let emitter = FlagEmitter::new(&self.settings);
        let outcome = emitter.emit(&dep_graph, &mut ctx.diagnostics)?;

        Ok(CalculationOutcome {
            spec: outcome.spec,
            diagnostics: ctx.take_diagnostics(),
            entrypoint_missing: outcome.entrypoint_missing,
        })
    }

    fn progress(&self, stage: &str) {
        if self.settings.verbose && !self.settings.quiet {
            eprintln!("chunker: {}", stage);
        }
    }
}
