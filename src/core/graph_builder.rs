//! Load-order graph construction
//!
//! Entry points are processed through a work queue: each chunk's entry files
//! are walked, their closures merged into the chunk, and every discovered
//! dynamic-import target becomes a child chunk. Manual entry points attach
//! under their configured parent once the queue drains.

use crate::core::context::BuildContext;
use crate::core::walker::{self, HoistMap};
use crate::error::{ChunkerError, OptionExt, Result};
use crate::models::chunk::{EntryPoint, FileDepInfo, ManualEntryPoint};
use crate::models::graph::LoadOrderGraph;
use petgraph::graph::NodeIndex;
use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;

/// Builds the load-order graph from entry points
pub struct ChunkGraphBuilder;

impl ChunkGraphBuilder {
    /// Build the load-order graph.
    ///
    /// The first entry point is the primary; every other initial entry point
    /// hangs off it. A discovered child chunk only gains a load-order edge
    /// when no edge already exists between the two chunks in either
    /// direction, so an established forward path blocks back-edge creation.
    pub fn build(
        ctx: &mut BuildContext,
        entrypoints: &[EntryPoint],
        manual_entrypoints: &[ManualEntryPoint],
        hoist_map: &HoistMap,
    ) -> Result<LoadOrderGraph> {
        if entrypoints.is_empty() {
            return Err(ChunkerError::config_error("at least one entry point is required"));
        }

        let mut graph = LoadOrderGraph::new();
        let mut queue: VecDeque<EntryPoint> = VecDeque::new();
        let mut primary = None;

        for (position, entry) in entrypoints.iter().enumerate() {
            let (idx, _) = graph.ensure_node(&entry.name);
            if position == 0 {
                graph.set_primary(idx);
                primary = Some(idx);
            } else if let Some(primary_idx) = primary {
                graph.add_edge(primary_idx, idx);
            }
            queue.push_back(entry.clone());
        }

        let mut manual_queue: VecDeque<ManualEntryPoint> =
            manual_entrypoints.iter().cloned().collect();
        let mut visited: HashSet<PathBuf> = HashSet::new();

        loop {
            while let Some(entry) = queue.pop_front() {
                if !visited.insert(entry.name.clone()) {
                    continue;
                }

                let (node_idx, _) = graph.ensure_node(&entry.name);

                for file in &entry.files {
                    let info = walker::walk(ctx, file, hoist_map)?;
                    Self::merge_walk(&mut graph, node_idx, &info);

                    for child in &info.child_chunks {
                        let (child_idx, created) = graph.ensure_node(child);
                        if created {
                            graph.node_mut(child_idx).push_source(child.clone());
                            queue.push_back(EntryPoint::from_file(child.clone()));
                        }
                        // Existing edges take precedence; a back-edge here
                        // would make the load-order graph cyclic.
                        if child_idx != node_idx && !graph.has_edge_between(node_idx, child_idx) {
                            graph.add_edge(node_idx, child_idx);
                        }
                    }
                }
            }

            // Manual entry points attach where specified even if otherwise
            // unreachable from discovery.
            match manual_queue.pop_front() {
                Some(manual) => {
                    let parent_idx = graph.index_of(&manual.parent).ok_or_error(|| {
                        ChunkerError::config_error(format!(
                            "manual entry point parent '{}' is not a known chunk",
                            manual.parent.display()
                        ))
                    })?;
                    let (child_idx, created) = graph.ensure_node(&manual.child.name);
                    if created {
                        graph.node_mut(child_idx).push_source(manual.child.name.clone());
                    }
                    if child_idx != parent_idx && !graph.has_edge_between(parent_idx, child_idx) {
                        graph.add_edge(parent_idx, child_idx);
                    }
                    queue.push_back(manual.child.clone());
                }
                None => break,
            }
        }

        graph.finalize_sources();
        Ok(graph)
    }

    /// Merge one file's walk results into a chunk.
    ///
    /// Sources accumulate dependents-first; the final reverse in
    /// `finalize_sources` flips them into load order with the chunk's own
    /// entry file last.
    fn merge_walk(graph: &mut LoadOrderGraph, idx: NodeIndex, info: &FileDepInfo) {
        let node = graph.node_mut(idx);
        for dep in info.deps.iter().rev() {
            node.push_source(dep.clone());
        }
        for dep in &info.deps {
            node.push_dep(dep.clone());
        }
        for child in &info.child_chunks {
            node.push_child_chunk(child.clone());
        }
    }
}
