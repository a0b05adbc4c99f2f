#![allow(dead_code)]

use radial_distribution_distance::graph::OwnedGraph;
use radial_distribution_distance::{NodeProfile, Result};

/// 1 - 2, 2 - 3, 2 - 4, 3 - 4, 3 - 6, 4 - 5
pub fn sample_graph() -> OwnedGraph<u32> {
    OwnedGraph::from_edges(vec![(1, 2), (2, 3), (2, 4), (3, 4), (3, 6), (4, 5)])
}

/// 0 - 1 - 2 - ... - (n - 1)
pub fn path_graph(n: u32) -> OwnedGraph<u32> {
    OwnedGraph::from_edges((1..n).map(|i| (i - 1, i)))
}

/// Hub 0 connected to leaves 1..=n.
pub fn star_graph(n: u32) -> OwnedGraph<u32> {
    OwnedGraph::from_edges((1..=n).map(|i| (0, i)))
}

pub fn single_node_graph() -> OwnedGraph<u32> {
    let mut builder = radial_distribution_distance::graph::GraphBuilder::new();
    builder.add_node(42);
    builder.graph()
}

pub fn radius_measure(_graph: &OwnedGraph<u32>, nodes: &[NodeProfile<u32>]) -> Result<Vec<f64>> {
    Ok(nodes.iter().map(|n| n.radius() as f64).collect())
}

pub fn short_measure(_graph: &OwnedGraph<u32>, nodes: &[NodeProfile<u32>]) -> Result<Vec<f64>> {
    Ok(vec![1.0; nodes.len().saturating_sub(1)])
}
