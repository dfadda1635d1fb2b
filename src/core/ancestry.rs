//! Common ancestor computation over the load-order graph
//!
//! For a set of chunks, the engine finds the nodes lying on every path from
//! each chunk back to the primary entry point, intersects those sets across
//! the group, and selects the deepest survivor as the lowest common
//! ancestor. Path enumeration uses an explicit stack; the graph may hold
//! multiple routes to the same chunk.

use crate::models::graph::LoadOrderGraph;
use petgraph::graph::NodeIndex;
use std::collections::{HashMap, HashSet, VecDeque};

/// Ancestor and LCA queries over one load-order graph
pub struct AncestorEngine<'g> {
    graph: &'g LoadOrderGraph,
    distances: HashMap<NodeIndex, usize>,
    path_cache: HashMap<NodeIndex, HashSet<NodeIndex>>,
}

impl<'g> AncestorEngine<'g> {
    /// Create an engine, precomputing unit-weight shortest-path distances
    /// from the primary entry point
    pub fn new(graph: &'g LoadOrderGraph) -> Self {
        let primary = graph.primary();
        let mut distances = HashMap::new();
        let mut queue = VecDeque::new();
        distances.insert(primary, 0usize);
        queue.push_back(primary);

        while let Some(current) = queue.pop_front() {
            let next_distance = distances[&current] + 1;
            for child in graph.children(current) {
                if !distances.contains_key(&child) {
                    distances.insert(child, next_distance);
                    queue.push_back(child);
                }
            }
        }

        Self {
            graph,
            distances,
            path_cache: HashMap::new(),
        }
    }

    /// The set of nodes that appear on every path from the primary entry
    /// point to `target`
    pub fn nodes_on_every_path(&mut self, target: NodeIndex) -> HashSet<NodeIndex> {
        if let Some(cached) = self.path_cache.get(&target) {
            return cached.clone();
        }
        let nodes = self.enumerate_paths(target);
        self.path_cache.insert(target, nodes.clone());
        nodes
    }

    /// The common ancestors of a group of nodes
    pub fn common_ancestors(&mut self, nodes: &[NodeIndex]) -> HashSet<NodeIndex> {
        let mut iter = nodes.iter();
        let mut result = match iter.next() {
            Some(first) => self.nodes_on_every_path(*first),
            None => return HashSet::new(),
        };
        for node in iter {
            let ancestors = self.nodes_on_every_path(*node);
            result = result.intersection(&ancestors).copied().collect();
        }
        result
    }

    /// The deepest common ancestor: greatest shortest-path distance from the
    /// primary entry point, ties broken lexicographically by node name
    pub fn lowest_common_ancestor(&mut self, nodes: &[NodeIndex]) -> NodeIndex {
        let candidates = self.common_ancestors(nodes);
        let mut best: Option<(usize, NodeIndex)> = None;

        for candidate in candidates {
            let distance = self.distances.get(&candidate).copied().unwrap_or(0);
            best = match best {
                None => Some((distance, candidate)),
                Some((best_distance, best_idx)) => {
                    let replace = distance > best_distance
                        || (distance == best_distance
                            && self.graph.node(candidate).name < self.graph.node(best_idx).name);
                    if replace {
                        Some((distance, candidate))
                    } else {
                        Some((best_distance, best_idx))
                    }
                }
            };
        }

        best.map(|(_, idx)| idx).unwrap_or_else(|| self.graph.primary())
    }

    /// Depth-first enumeration of simple paths from the primary entry point
    /// to `target`, keeping only nodes present on all of them
    fn enumerate_paths(&self, target: NodeIndex) -> HashSet<NodeIndex> {
        let primary = self.graph.primary();
        if target == primary {
            let mut only_primary = HashSet::new();
            only_primary.insert(primary);
            return only_primary;
        }

        let mut result: Option<HashSet<NodeIndex>> = None;
        let mut stack = vec![(primary, self.graph.children(primary).into_iter())];
        let mut on_path: HashSet<NodeIndex> = HashSet::new();
        on_path.insert(primary);

        while let Some((_, iter)) = stack.last_mut() {
            match iter.next() {
                Some(next) => {
                    if on_path.contains(&next) {
                        continue;
                    }
                    if next == target {
                        let mut nodes: HashSet<NodeIndex> =
                            stack.iter().map(|(node, _)| *node).collect();
                        nodes.insert(target);
                        result = Some(match result.take() {
                            None => nodes,
                            Some(prev) => prev.intersection(&nodes).copied().collect(),
                        });
                        continue;
                    }
                    on_path.insert(next);
                    stack.push((next, self.graph.children(next).into_iter()));
                }
                None => {
                    if let Some((node, _)) = stack.pop() {
                        on_path.remove(&node);
                    }
                }
            }
        }

        result.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    /// Build a graph from name/edge lists; the first name is the primary.
    fn graph_of(names: &[&str], edges: &[(&str, &str)]) -> LoadOrderGraph {
        let mut graph = LoadOrderGraph::new();
        for (position, name) in names.iter().enumerate() {
            let (idx, _) = graph.ensure_node(Path::new(name));
            if position == 0 {
                graph.set_primary(idx);
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
    fn test_diamond_common_ancestor() {
        // e -> b -> d, e -> c -> d
        let graph = graph_of(
            &["/e.js", "/b.js", "/c.js", "/d.js"],
            &[("/e.js", "/b.js"), ("/e.js", "/c.js"), ("/b.js", "/d.js"), ("/c.js", "/d.js")],
        );
        let d = graph.index_of(Path::new("/d.js")).unwrap();
        let e = graph.index_of(Path::new("/e.js")).unwrap();

        let mut engine = AncestorEngine::new(&graph);
        let on_every_path = engine.nodes_on_every_path(d);

        // b and c each appear on only one of the two paths
        assert_eq!(on_every_path, HashSet::from([e, d]));
    }

    #[test]
    fn test_lca_of_siblings_is_parent() {
        let graph = graph_of(
            &["/a.js", "/b.js", "/c.js"],
            &[("/a.js", "/b.js"), ("/a.js", "/c.js")],
        );
        let a = graph.index_of(Path::new("/a.js")).unwrap();
        let b = graph.index_of(Path::new("/b.js")).unwrap();
        let c = graph.index_of(Path::new("/c.js")).unwrap();

        let mut engine = AncestorEngine::new(&graph);
        assert_eq!(engine.lowest_common_ancestor(&[b, c]), a);
    }

    #[test]
    fn test_lca_prefers_deepest_ancestor() {
        // a -> m, m -> x, m -> y: the LCA of x and y is m, not a
        let graph = graph_of(
            &["/a.js", "/m.js", "/x.js", "/y.js"],
            &[("/a.js", "/m.js"), ("/m.js", "/x.js"), ("/m.js", "/y.js")],
        );
        let m = graph.index_of(Path::new("/m.js")).unwrap();
        let x = graph.index_of(Path::new("/x.js")).unwrap();
        let y = graph.index_of(Path::new("/y.js")).unwrap();

        let mut engine = AncestorEngine::new(&graph);
        assert_eq!(engine.lowest_common_ancestor(&[x, y]), m);
    }

    #[test]
    fn test_lca_of_single_node_is_itself() {
        let graph = graph_of(&["/a.js", "/b.js"], &[("/a.js", "/b.js")]);
        let b = graph.index_of(Path::new("/b.js")).unwrap();

        let mut engine = AncestorEngine::new(&graph);
        assert_eq!(engine.lowest_common_ancestor(&[b]), b);
    }

    #[test]
    fn test_multiple_paths_keep_only_shared_nodes() {
        // a -> b -> d and a -> d directly: only a and d are on every path
        let graph = graph_of(
            &["/a.js", "/b.js", "/d.js"],
            &[("/a.js", "/b.js"), ("/b.js", "/d.js"), ("/a.js", "/d.js")],
        );
        let a = graph.index_of(Path::new("/a.js")).unwrap();
        let d = graph.index_of(Path::new("/d.js")).unwrap();

        let mut engine = AncestorEngine::new(&graph);
        assert_eq!(engine.nodes_on_every_path(d), HashSet::from([a, d]));
    }

    #[test]
    fn test_cycle_guard_terminates() {
        // Load-order graphs are normally acyclic; the guard still has to
        // terminate if they are not.
        let graph = graph_of(
            &["/a.js", "/b.js", "/c.js"],
            &[("/a.js", "/b.js"), ("/b.js", "/c.js"), ("/c.js", "/b.js")],
        );
        let c = graph.index_of(Path::new("/c.js")).unwrap();
        let a = graph.index_of(Path::new("/a.js")).unwrap();
        let b = graph.index_of(Path::new("/b.js")).unwrap();

        let mut engine = AncestorEngine::new(&graph);
        assert_eq!(engine.nodes_on_every_path(c), HashSet::from([a, b, c]));
    }
}
