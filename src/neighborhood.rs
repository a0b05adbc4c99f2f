use crate::error::{Error, Result};
use crate::graph::OwnedGraph;
use crate::graph_traits::NodeKey;
use petgraph::graph::NodeIndex;
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

/// Shortest path from a root to every node within a radius, keyed by the reached node.
pub type Neighborhood<K> = BTreeMap<K, Vec<K>>;

/// Computes the shortest path from `source` to every node reachable within `radius` hops.
///
/// Each path starts with `source` and ends with the reached node; `source` itself maps to
/// `[source]`. When several shortest paths exist, the lexicographically smallest one (by key
/// order) is returned: every BFS level is expanded in path order and neighbors are visited in
/// key order, so the first discovery of a node is always through its smallest path.
pub fn build_neighborhood<K: NodeKey>(
    graph: &OwnedGraph<K>,
    source: &K,
    radius: usize,
) -> Result<Neighborhood<K>> {
    let root = graph
        .node_index(source)
        .ok_or_else(|| Error::node_not_found(source))?;

    let mut paths: HashMap<NodeIndex, Vec<NodeIndex>> = HashMap::new();
    paths.insert(root, vec![root]);

    let mut frontier = vec![root];
    for _ in 0..radius {
        let mut next = Vec::new();
        for &node in &frontier {
            let parent_path = paths[&node].clone();
            for neighbor in graph.sorted_neighbors(node) {
                if let Entry::Vacant(e) = paths.entry(neighbor) {
                    let mut path = Vec::with_capacity(parent_path.len() + 1);
                    path.extend_from_slice(&parent_path);
                    path.push(neighbor);
                    e.insert(path);
                    next.push(neighbor);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        frontier = next;
    }

    Ok(paths
        .into_iter()
        .map(|(node, path)| {
            (
                graph.key(node).clone(),
                path.into_iter().map(|idx| graph.key(idx).clone()).collect(),
            )
        })
        .collect())
}
