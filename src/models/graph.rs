//! Graph data structures for chunk calculation
//!
//! Both graphs store chunk nodes in a petgraph arena identified by numeric
//! index, with a side table keyed by chunk name. Edges never hold object
//! references, which keeps the structures easy to serialize and test.

use crate::models::chunk::ChunkNode;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// The load-order graph: edge `A -> B` means loading A makes B reachable
/// through a dynamic import. The root is the primary entry point.
#[derive(Debug, Clone, Default)]
pub struct LoadOrderGraph {
    graph: DiGraph<ChunkNode, ()>,
    index: HashMap<PathBuf, NodeIndex>,
    primary: Option<NodeIndex>,
}

impl LoadOrderGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a node index by chunk name
    pub fn index_of(&self, name: &Path) -> Option<NodeIndex> {
        self.index.get(name).copied()
    }

    /// Get the node for an index
    pub fn node(&self, idx: NodeIndex) -> &ChunkNode {
        &self.graph[idx]
    }

    /// Get the node for an index, mutably
    pub fn node_mut(&mut self, idx: NodeIndex) -> &mut ChunkNode {
        &mut self.graph[idx]
    }

    /// Find or create the node for a chunk name; returns the index and
    /// whether the node was newly created
    pub fn ensure_node(&mut self, name: &Path) -> (NodeIndex, bool) {
        if let Some(idx) = self.index.get(name) {
            return (*idx, false);
        }
        let idx = self.graph.add_node(ChunkNode::new(name));
        self.index.insert(name.to_path_buf(), idx);
        (idx, true)
    }

    /// Mark the primary entry point
    pub fn set_primary(&mut self, idx: NodeIndex) {
        self.primary = Some(idx);
    }

    /// The primary entry point's node index
    pub fn primary(&self) -> NodeIndex {
        self.primary.unwrap_or_else(|| NodeIndex::new(0))
    }

    /// Add a load-order edge
    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex) {
        if self.graph.find_edge(from, to).is_none() {
            self.graph.add_edge(from, to, ());
        }
    }

    /// Whether an edge exists between two nodes in either direction
    pub fn has_edge_between(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.graph.find_edge(a, b).is_some() || self.graph.find_edge(b, a).is_some()
    }

    /// All node indices in insertion order
    pub fn node_indices(&self) -> Vec<NodeIndex> {
        self.graph.node_indices().collect()
    }

    /// Number of chunk nodes
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Child chunks of a node, in edge insertion order
    pub fn children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut out: Vec<NodeIndex> = self.graph.neighbors_directed(idx, Direction::Outgoing).collect();
        out.reverse();
        out
    }

    /// Parent chunks of a node, in edge insertion order
    pub fn parents(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut out: Vec<NodeIndex> = self.graph.neighbors_directed(idx, Direction::Incoming).collect();
        out.reverse();
        out
    }

    /// Reverse every chunk's source list so dependencies come first and the
    /// chunk's own entry file is the last element
    pub fn finalize_sources(&mut self) {
        for node in self.graph.node_weights_mut() {
            node.sources.reverse();
        }
    }

    /// Every source path with the list of nodes owning it, in discovery order
    pub fn sources_by_owner(&self) -> Vec<(PathBuf, Vec<NodeIndex>)> {
        let mut order: Vec<PathBuf> = Vec::new();
        let mut owners: HashMap<PathBuf, Vec<NodeIndex>> = HashMap::new();

        for idx in self.graph.node_indices() {
            for source in &self.graph[idx].sources {
                let entry = owners.entry(source.clone()).or_insert_with(|| {
                    order.push(source.clone());
                    Vec::new()
                });
                entry.push(idx);
            }
        }

        order
            .into_iter()
            .map(|source| {
                let nodes = owners.remove(&source).unwrap_or_default();
                (source, nodes)
            })
            .collect()
    }

    /// Which chunk owns each source file
    pub fn source_owners(&self) -> HashMap<PathBuf, NodeIndex> {
        let mut out = HashMap::new();
        for idx in self.graph.node_indices() {
            for source in &self.graph[idx].sources {
                out.entry(source.clone()).or_insert(idx);
            }
        }
        out
    }
}

/// The projected dependency graph: edge `A -> B` means chunk B cannot load
/// until chunk A has loaded.
#[derive(Debug, Clone)]
pub struct ChunkDependencyGraph {
    graph: DiGraph<ChunkNode, ()>,
    index: HashMap<PathBuf, NodeIndex>,
    primary: NodeIndex,
}

impl ChunkDependencyGraph {
    /// Build from an ordered node list, a primary index, and parent edges
    pub fn from_parts(
        nodes: Vec<ChunkNode>,
        primary: NodeIndex,
        edges: Vec<(NodeIndex, NodeIndex)>,
    ) -> Self {
        let mut graph = DiGraph::new();
        let mut index = HashMap::new();
        for node in nodes {
            let name = node.name.clone();
            let idx = graph.add_node(node);
            index.insert(name, idx);
        }
        for (from, to) in edges {
            if graph.find_edge(from, to).is_none() {
                graph.add_edge(from, to, ());
            }
        }
        Self { graph, index, primary }
    }

    /// The primary entry point's node index
    pub fn primary(&self) -> NodeIndex {
        self.primary
    }

    /// Look up a node index by chunk name
    pub fn index_of(&self, name: &Path) -> Option<NodeIndex> {
        self.index.get(name).copied()
    }

    /// Get the node for an index
    pub fn node(&self, idx: NodeIndex) -> &ChunkNode {
        &self.graph[idx]
    }

    /// All node indices in insertion order
    pub fn node_indices(&self) -> Vec<NodeIndex> {
        self.graph.node_indices().collect()
    }

    /// Number of chunk nodes
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Parent chunks of a node, in edge insertion order
    pub fn parents(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut out: Vec<NodeIndex> = self.graph.neighbors_directed(idx, Direction::Incoming).collect();
        out.reverse();
        out
    }

    /// All parent edges as (from, to) pairs, in node order
    pub fn edges(&self) -> Vec<(NodeIndex, NodeIndex)> {
        let mut out = Vec::new();
        for to in self.graph.node_indices() {
            for from in self.parents(to) {
                out.push((from, to));
            }
        }
        out
    }

    /// Detect a node taking part in a cycle, if any
    pub fn find_cycle_node(&self) -> Option<NodeIndex> {
        petgraph::algo::toposort(&self.graph, None)
            .err()
            .map(|cycle| cycle.node_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_node_is_idempotent() {
        let mut graph = LoadOrderGraph::new();
        let (a, created_a) = graph.ensure_node(Path::new("/p/a.js"));
        let (a2, created_a2) = graph.ensure_node(Path::new("/p/a.js"));
        assert!(created_a);
        assert!(!created_a2);
        assert_eq!(a, a2);
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_edge_detection_either_direction() {
        let mut graph = LoadOrderGraph::new();
        let (a, _) = graph.ensure_node(Path::new("/p/a.js"));
        let (b, _) = graph.ensure_node(Path::new("/p/b.js"));
        graph.add_edge(a, b);
        assert!(graph.has_edge_between(a, b));
        assert!(graph.has_edge_between(b, a));
        assert_eq!(graph.children(a), vec![b]);
        assert_eq!(graph.parents(b), vec![a]);
    }

    #[test]
    fn test_finalize_sources_reverses() {
        let mut graph = LoadOrderGraph::new();
        let (a, _) = graph.ensure_node(Path::new("/p/a.js"));
        graph.node_mut(a).push_source(PathBuf::from("/p/a.js"));
        graph.node_mut(a).push_source(PathBuf::from("/p/b.js"));
        graph.finalize_sources();
        assert_eq!(
            graph.node(a).sources,
            vec![PathBuf::from("/p/b.js"), PathBuf::from("/p/a.js")]
        );
    }

    #[test]
    fn test_sources_by_owner_groups_shared() {
        let mut graph = LoadOrderGraph::new();
        let (a, _) = graph.ensure_node(Path::new("/p/a.js"));
        let (b, _) = graph.ensure_node(Path::new("/p/b.js"));
        graph.node_mut(a).push_source(PathBuf::from("/p/shared.js"));
        graph.node_mut(b).push_source(PathBuf::from("/p/shared.js"));
        graph.node_mut(b).push_source(PathBuf::from("/p/b.js"));

        let by_owner = graph.sources_by_owner();
        assert_eq!(by_owner.len(), 2);
        assert_eq!(by_owner[0].0, PathBuf::from("/p/shared.js"));
        assert_eq!(by_owner[0].1, vec![a, b]);
        assert_eq!(by_owner[1].1, vec![b]);
    }

    #[test]
    fn test_dependency_graph_cycle_detection() {
        let nodes = vec![ChunkNode::new("/p/a.js"), ChunkNode::new("/p/b.js")];
        let a = NodeIndex::new(0);
        let b = NodeIndex::new(1);

        let acyclic = ChunkDependencyGraph::from_parts(nodes.clone(), a, vec![(a, b)]);
        assert!(acyclic.find_cycle_node().is_none());

        let cyclic = ChunkDependencyGraph::from_parts(nodes, a, vec![(a, b), (b, a)]);
        assert!(cyclic.find_cycle_node().is_some());
    }
}
