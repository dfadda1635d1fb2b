//! Dependency-graph projection
//!
//! Reassigns edges from the load-order graph based on which chunk owns each
//! static dependency, then removes transitively redundant parents. The
//! result tells the optimizer which chunks must be loaded before which.

use crate::error::{ChunkerError, Result};
use crate::models::chunk::ChunkNode;
use crate::models::graph::{ChunkDependencyGraph, LoadOrderGraph};
use petgraph::graph::NodeIndex;
use std::collections::HashMap;

/// Project the load-order graph into the chunk dependency graph
pub fn project(load: &LoadOrderGraph) -> Result<ChunkDependencyGraph> {
    let primary = load.primary();
    let source_owner = load.source_owners();
    let indices = load.node_indices();

    // Candidate parents: the primary entry for every other chunk, plus the
    // owner of every static dep the chunk pulls in.
    let mut candidates: HashMap<NodeIndex, Vec<NodeIndex>> = HashMap::new();
    for &idx in &indices {
        let mut parents: Vec<NodeIndex> = Vec::new();
        if idx != primary {
            parents.push(primary);
        }
        for dep in &load.node(idx).deps {
            if let Some(&owner) = source_owner.get(dep) {
                if owner != idx && !parents.contains(&owner) {
                    parents.push(owner);
                }
            }
        }
        candidates.insert(idx, parents);
    }

    // Keep only parents that are not reachable through another parent:
    // if parent p also appears among the candidate parents of parent p2,
    // p is redundant for this chunk.
    let mut edges: Vec<(NodeIndex, NodeIndex)> = Vec::new();
    for &idx in &indices {
        let parents = &candidates[&idx];
        for &parent in parents {
            let redundant = parents.iter().any(|&other| {
                other != parent
                    && candidates
                        .get(&other)
                        .map(|grand| grand.contains(&parent))
                        .unwrap_or(false)
            });
            if !redundant {
                edges.push((parent, idx));
            }
        }
    }

    let nodes: Vec<ChunkNode> = indices.iter().map(|&idx| load.node(idx).clone()).collect();
    let graph = ChunkDependencyGraph::from_parts(nodes, primary, edges);

    if let Some(cycle_node) = graph.find_cycle_node() {
        return Err(ChunkerError::cyclic_chunk_graph(graph.node(cycle_node).name.clone()));
    }

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    /// Build a load-order graph where each chunk owns its entry file plus
    /// the listed extra sources, and declares the listed deps.
    fn load_graph(
        chunks: &[(&str, &[&str], &[&str])],
        edges: &[(&str, &str)],
    ) -> LoadOrderGraph {
        let mut graph = LoadOrderGraph::new();
        for (position, (name, extra_sources, deps)) in chunks.iter().enumerate() {
            let (idx, _) = graph.ensure_node(Path::new(name));
            if position == 0 {
                graph.set_primary(idx);
            }
            for source in *extra_sources {
                graph.node_mut(idx).push_source(PathBuf::from(source));
            }
            graph.node_mut(idx).push_source(PathBuf::from(name));
            for dep in *deps {
                graph.node_mut(idx).push_dep(PathBuf::from(dep));
            }
        }
        for (from, to) in edges {
            let from_idx = graph.index_of(Path::new(from)).unwrap();
            let to_idx = graph.index_of(Path::new(to)).unwrap();
            graph.add_edge(from_idx, to_idx);
        }
        graph
    }

    #[test]
    fn test_every_chunk_depends_on_primary() {
        let graph = load_graph(
            &[("/a.js", &[], &[]), ("/b.js", &[], &[])],
            &[("/a.js", "/b.js")],
        );

        let projected = project(&graph).unwrap();
        let a = projected.index_of(Path::new("/a.js")).unwrap();
        let b = projected.index_of(Path::new("/b.js")).unwrap();
        assert!(projected.parents(a).is_empty());
        assert_eq!(projected.parents(b), vec![a]);
    }

    #[test]
    fn test_dep_ownership_creates_parent() {
        // c's deps include a file owned by b, so c must wait for b
        let graph = load_graph(
            &[
                ("/a.js", &[], &[]),
                ("/b.js", &["/shared.js"], &[]),
                ("/c.js", &[], &["/shared.js"]),
            ],
            &[("/a.js", "/b.js"), ("/a.js", "/c.js")],
        );

        let projected = project(&graph).unwrap();
        let a = projected.index_of(Path::new("/a.js")).unwrap();
        let b = projected.index_of(Path::new("/b.js")).unwrap();
        let c = projected.index_of(Path::new("/c.js")).unwrap();
        // The direct primary parent of c is redundant: b already depends
        // on the primary.
        assert_eq!(projected.parents(b), vec![a]);
        assert_eq!(projected.parents(c), vec![b]);
    }

    #[test]
    fn test_projection_is_idempotent() {
        let graph = load_graph(
            &[
                ("/a.js", &[], &[]),
                ("/b.js", &["/shared.js"], &[]),
                ("/c.js", &[], &["/shared.js"]),
            ],
            &[("/a.js", "/b.js"), ("/a.js", "/c.js")],
        );

        let first = project(&graph).unwrap();
        let second = project(&graph).unwrap();
        assert_eq!(first.edges(), second.edges());
    }

    #[test]
    fn test_cyclic_dependency_graph_is_fatal() {
        // b owns a file c depends on and c owns a file b depends on, with
        // unrelated third parties keeping both parent lists non-redundant
        let graph = load_graph(
            &[
                ("/a.js", &[], &[]),
                ("/b.js", &["/x.js"], &["/y.js"]),
                ("/c.js", &["/y.js"], &["/x.js"]),
            ],
            &[("/a.js", "/b.js"), ("/a.js", "/c.js")],
        );

        let result = project(&graph);
        assert!(matches!(result, Err(ChunkerError::CyclicChunkGraph { .. })));
    }

    #[test]
    fn test_deps_owned_by_self_are_ignored() {
        let graph = load_graph(
            &[("/a.js", &["/lib.js"], &["/lib.js"]), ("/b.js", &[], &[])],
            &[("/a.js", "/b.js")],
        );

        let projected = project(&graph).unwrap();
        let a = projected.index_of(Path::new("/a.js")).unwrap();
        assert!(projected.parents(a).is_empty());
    }
}
