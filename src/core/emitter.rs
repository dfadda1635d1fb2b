//! Chunk flag emission
//!
//! Walks the dependency graph in topological order and renders one
//! `<name>:<sourceCount>[:<parent>,…]` flag string per chunk, along with the
//! flat source list. Chunk names come from a configurable mapper.

use crate::error::{ChunkerError, Result};
use crate::models::config::{NameStyle, Settings};
use crate::models::graph::ChunkDependencyGraph;
use crate::models::output::{ChunkSpec, ChunkSummary, Diagnostic};
use crate::utils::paths;
use petgraph::graph::NodeIndex;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Result of emission
#[derive(Debug)]
pub struct EmitOutcome {
    /// The rendered chunk specification
    pub spec: ChunkSpec,

    /// Whether any chunk's entry file was missing from its own sources
    pub entrypoint_missing: bool,
}

/// Renders the chunk specification from a dependency graph
pub struct FlagEmitter<'a> {
    name_style: NameStyle,
    chunk_prefix: &'a str,
    base_dir: &'a Path,
}

impl<'a> FlagEmitter<'a> {
    /// Create an emitter from settings
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            name_style: settings.name_style,
            chunk_prefix: settings.chunk_prefix.as_deref().unwrap_or(""),
            base_dir: &settings.base_directory,
        }
    }

    /// Emit the chunk flags and flat source list in topological order
    pub fn emit(
        &self,
        graph: &ChunkDependencyGraph,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<EmitOutcome> {
        let order = self.emission_order(graph)?;

        let mut mapper = NameMapper::new(self.name_style, self.chunk_prefix, self.base_dir);
        let mut names: HashMap<NodeIndex, String> = HashMap::new();
        for &idx in &order {
            let node = graph.node(idx);
            names.insert(idx, mapper.name_for(&node.name, idx == graph.primary()));
        }

        let mut entrypoint_missing = false;
        let mut chunks = Vec::with_capacity(order.len());
        let mut chunk_flags = Vec::with_capacity(order.len());
        let mut sources: Vec<PathBuf> = Vec::new();

        for &idx in &order {
            let node = graph.node(idx);

            if !node.owns_source(&node.name) {
                entrypoint_missing = true;
                let referencing: Vec<PathBuf> = graph
                    .node_indices()
                    .into_iter()
                    .filter(|&other| other != idx)
                    .filter(|&other| graph.node(other).deps.contains(&node.name))
                    .map(|other| graph.node(other).name.clone())
                    .collect();
                let err = ChunkerError::chunk_entrypoint_missing(node.name.clone(), referencing);
                diagnostics.push(Diagnostic::error(err.user_message()));
            }

            let name = names[&idx].clone();
            let parent_names: Vec<String> = graph
                .parents(idx)
                .into_iter()
                .map(|parent| names[&parent].clone())
                .collect();

            let flag = if parent_names.is_empty() {
                format!("{}:{}", name, node.sources.len())
            } else {
                format!("{}:{}:{}", name, node.sources.len(), parent_names.join(","))
            };

            sources.extend(node.sources.iter().cloned());
            chunk_flags.push(flag);
            chunks.push(ChunkSummary {
                name,
                entry: node.name.clone(),
                source_count: node.sources.len(),
                parents: parent_names,
            });
        }

        Ok(EmitOutcome {
            spec: ChunkSpec {
                chunks,
                chunk_flags,
                sources,
            },
            entrypoint_missing,
        })
    }

    /// Repeated passes over the chunks: a chunk is emitted once all of its
    /// parents are. A pass without progress means the sort cannot finish.
    fn emission_order(&self, graph: &ChunkDependencyGraph) -> Result<Vec<NodeIndex>> {
        let indices = graph.node_indices();
        let total = indices.len();
        let mut emitted: HashSet<NodeIndex> = HashSet::new();
        let mut order: Vec<NodeIndex> = Vec::new();

        while order.len() < total {
            let mut progress = false;
            for &idx in &indices {
                if emitted.contains(&idx) {
                    continue;
                }
                if graph.parents(idx).iter().all(|parent| emitted.contains(parent)) {
                    emitted.insert(idx);
                    order.push(idx);
                    progress = true;
                }
            }
            if !progress {
                let remaining: Vec<PathBuf> = indices
                    .iter()
                    .filter(|idx| !emitted.contains(idx))
                    .map(|&idx| graph.node(idx).name.clone())
                    .collect();
                return Err(ChunkerError::unsortable_chunks(remaining));
            }
        }

        Ok(order)
    }
}

/// Maps chunk entry files to output chunk names
struct NameMapper<'a> {
    style: NameStyle,
    prefix: &'a str,
    base_dir: &'a Path,
    used: HashMap<String, usize>,
    counter: usize,
}

impl<'a> NameMapper<'a> {
    fn new(style: NameStyle, prefix: &'a str, base_dir: &'a Path) -> Self {
        Self {
            style,
            prefix,
            base_dir,
            used: HashMap::new(),
            counter: 0,
        }
    }

    fn name_for(&mut self, entry: &Path, is_primary: bool) -> String {
        let base = match self.style {
            NameStyle::Numbered => {
                if is_primary {
                    "main".to_string()
                } else {
                    let number = self.counter;
                    self.counter += 1;
                    number.to_string()
                }
            }
            NameStyle::Entrypoint => {
                let relative = paths::project_relative(entry, self.base_dir);
                relative
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().to_string())
                    .unwrap_or_else(|| "chunk".to_string())
            }
        };

        let name = format!("{}{}", self.prefix, base);
        let seen = self.used.entry(name.clone()).or_insert(0);
        if *seen > 0 {
            let suffixed = format!("{}{}", name, *seen);
            *seen += 1;
            suffixed
        } else {
            *seen = 1;
            name
        }
    }
}
