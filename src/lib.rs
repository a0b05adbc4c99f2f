//! Radial Distribution Distance (RDD): a dissimilarity between two graph nodes, possibly of
//! two different graphs.
//!
//! Around each node, a structural measure (degree, triangles, cliques, centralities, ...) is
//! attached to every node within a shortest-path radius. Summing the measures by radius and
//! accumulating outward gives a cumulative radial distribution (CRD). The distance between
//! two nodes is the radius-weighted L1 discrepancy of their CRDs, `sum exp(-r) * |a[r] - b[r]|`
//! by default, so differences close to the roots dominate.
//!
//! ```ignore
//! let g = OwnedGraph::from_edges(vec![(1, 2), (2, 3), (2, 4), (3, 4), (3, 6), (4, 5)]);
//! let d = rdd_between(&g, &1, None, &2, &BuiltinMeasure::global(Metric::Degree), &RddConfig::new(2))?;
//! ```

pub mod algo;
mod batch;
mod compare;
mod config;
mod crd;
mod error;
pub mod graph;
mod graph_traits;
mod measure;
mod neighborhood;
mod profile;
mod rdd;
mod weighting;

pub use {
    batch::*, compare::*, config::*, crd::*, error::*, graph_traits::*, measure::*,
    neighborhood::*, profile::*, rdd::*, weighting::*,
};

pub use algo::{ConvergencePolicy, KatzConfig, PageRankConfig};

use graph::OwnedGraph;

/// Distance between `u` and `v` of the same graph, measured by global degree.
pub fn degree_rdd<K: NodeKey>(graph: &OwnedGraph<K>, u: &K, v: &K, radius: usize) -> Result<f64> {
    rdd_between(
        graph,
        u,
        None,
        v,
        &BuiltinMeasure::global(Metric::Degree),
        &RddConfig::new(radius),
    )
}
