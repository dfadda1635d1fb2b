//! Chunk ownership normalization
//!
//! After discovery a source file may be owned by several chunks. The
//! normalizer groups shared sources by their exact owner set, computes the
//! group's lowest common ancestor, records the sources in a hoist map keyed
//! by the ancestor's name, and deletes them from every other owner. Graph
//! topology is left untouched; the caller rebuilds with the hoist map when
//! it is non-empty.

use crate::core::ancestry::AncestorEngine;
use crate::core::walker::HoistMap;
use crate::models::graph::LoadOrderGraph;
use petgraph::graph::NodeIndex;
use std::collections::HashMap;
use std::path::PathBuf;

/// Enforce single ownership of every source, returning the hoist map for
/// the next build pass
pub fn normalize(graph: &mut LoadOrderGraph) -> HoistMap {
    let mut hoist_map = HoistMap::new();

    // Restrict to sources owned by more than one chunk, grouped by the
    // identical set of owners.
    let shared: Vec<(PathBuf, Vec<NodeIndex>)> = graph
        .sources_by_owner()
        .into_iter()
        .filter(|(_, owners)| owners.len() > 1)
        .collect();

    if shared.is_empty() {
        return hoist_map;
    }

    let mut group_order: Vec<Vec<usize>> = Vec::new();
    let mut groups: HashMap<Vec<usize>, Vec<PathBuf>> = HashMap::new();
    for (source, owners) in shared {
        let mut key: Vec<usize> = owners.iter().map(|idx| idx.index()).collect();
        key.sort_unstable();
        groups
            .entry(key.clone())
            .or_insert_with(|| {
                group_order.push(key);
                Vec::new()
            })
            .push(source);
    }

    // Plan with an immutable borrow, then apply the deletions.
    let mut planned: Vec<(NodeIndex, Vec<NodeIndex>, Vec<PathBuf>)> = Vec::new();
    {
        let mut engine = AncestorEngine::new(graph);
        for key in &group_order {
            let owners: Vec<NodeIndex> = key.iter().map(|raw| NodeIndex::new(*raw)).collect();
            let lca = engine.lowest_common_ancestor(&owners);
            let sources = groups.remove(key).unwrap_or_default();
            planned.push((lca, owners, sources));
        }
    }

    for (lca, owners, sources) in planned {
        let lca_name = graph.node(lca).name.clone();
        for source in sources {
            let hoists = hoist_map.entry(lca_name.clone()).or_default();
            if !hoists.contains(&source) {
                hoists.push(source.clone());
            }
            for owner in &owners {
                if *owner != lca {
                    graph.node_mut(*owner).sources.retain(|s| s != &source);
                }
            }
        }
    }

    hoist_map
}
