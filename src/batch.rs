//! One-to-all and all-pairs radial distribution distances.
//!
//! Every pair is an independent unit of work and is evaluated on the rayon thread pool.
//! Failures are isolated: a node whose radial profile cannot be computed is skipped and
//! recorded with its error instead of aborting the whole batch.

use crate::compare::RadialProfile;
use crate::config::RddConfig;
use crate::error::{Error, Result};
use crate::graph::OwnedGraph;
use crate::graph_traits::NodeKey;
use crate::measure::{Measure, PreparedMeasure};
use ndarray::{Array2, ArrayView1};
use rayon::prelude::*;
use serde::Serialize;
use tracing::warn;

/// One row of a one-to-all batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RddRecord<K: NodeKey> {
    pub node: K,
    pub rdd: f64,
    pub degree: usize,
}

impl<K: NodeKey> RddRecord<K> {
    /// `log10(rdd)`, or 0 for a distance of 0.
    pub fn log_rdd(&self) -> f64 {
        if self.rdd == 0.0 {
            0.0
        } else {
            self.rdd.log10()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchFailure<K: NodeKey> {
    pub node: K,
    pub error: Error,
}

#[derive(Debug, Clone)]
pub struct BatchReport<K: NodeKey> {
    /// Successful rows, in node key order.
    pub records: Vec<RddRecord<K>>,
    /// Skipped nodes.
    pub failures: Vec<BatchFailure<K>>,
}

impl<K: NodeKey> BatchReport<K> {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn get(&self, node: &K) -> Option<&RddRecord<K>> {
        self.records.iter().find(|r| &r.node == node)
    }
}

/// Distance from `source` to every node of `graph`, including itself.
///
/// # Errors
/// Fails only if the radial profile of `source` cannot be computed.
pub fn rdds_from_source<K, M>(
    graph: &OwnedGraph<K>,
    source: &K,
    measure: &M,
    config: &RddConfig,
) -> Result<BatchReport<K>>
where
    K: NodeKey,
    M: Measure<K> + Sync + ?Sized,
{
    rdds_from_source_across(graph, source, graph, measure, config)
}

/// Distance from `source` in `graph_a` to every node of `graph_b`. Degrees are taken in
/// `graph_b`.
pub fn rdds_from_source_across<K, M>(
    graph_a: &OwnedGraph<K>,
    source: &K,
    graph_b: &OwnedGraph<K>,
    measure: &M,
    config: &RddConfig,
) -> Result<BatchReport<K>>
where
    K: NodeKey,
    M: Measure<K> + Sync + ?Sized,
{
    let prepared_b = PreparedMeasure::new(measure, graph_b);
    let prepared_a;
    let origin_measure = if std::ptr::eq(graph_a, graph_b) {
        &prepared_b
    } else {
        prepared_a = PreparedMeasure::new(measure, graph_a);
        &prepared_a
    };

    let origin = RadialProfile::compute(graph_a, source, origin_measure, config.radius)?;
    let targets: Vec<&K> = graph_b.node_keys().collect();

    let outcomes: Vec<std::result::Result<RddRecord<K>, BatchFailure<K>>> = targets
        .par_iter()
        .map(|&target| {
            RadialProfile::compute(graph_b, target, &prepared_b, config.radius)
                .map(|profile| RddRecord {
                    node: target.clone(),
                    rdd: origin.distance_to(&profile, config.weighting),
                    degree: graph_b.degree(target).unwrap_or(0),
                })
                .map_err(|error| BatchFailure {
                    node: target.clone(),
                    error,
                })
        })
        .collect();

    let mut report = BatchReport {
        records: Vec::with_capacity(outcomes.len()),
        failures: Vec::new(),
    };
    for outcome in outcomes {
        match outcome {
            Ok(record) => report.records.push(record),
            Err(failure) => {
                warn!(node = ?failure.node, error = %failure.error, "skipping node");
                report.failures.push(failure);
            }
        }
    }
    Ok(report)
}

/// All-pairs distances of one graph.
#[derive(Debug, Clone)]
pub struct RddMatrix<K: NodeKey> {
    nodes: Vec<K>,
    distances: Array2<f64>,
    failures: Vec<BatchFailure<K>>,
}

impl<K: NodeKey> RddMatrix<K> {
    /// Row and column labels, in ascending key order.
    pub fn nodes(&self) -> &[K] {
        &self.nodes
    }

    /// `distances[(i, j)]` is the distance between `nodes[i]` and `nodes[j]`. Rows and
    /// columns of failed nodes are NaN.
    pub fn distances(&self) -> &Array2<f64> {
        &self.distances
    }

    pub fn failures(&self) -> &[BatchFailure<K>] {
        &self.failures
    }

    fn position(&self, node: &K) -> Option<usize> {
        self.nodes.binary_search(node).ok()
    }

    pub fn get(&self, a: &K, b: &K) -> Option<f64> {
        Some(self.distances[(self.position(a)?, self.position(b)?)])
    }

    pub fn row(&self, node: &K) -> Option<ArrayView1<'_, f64>> {
        self.position(node).map(|i| self.distances.row(i))
    }
}

/// Distance between every pair of nodes of `graph`. Each node's radial profile is computed
/// once, and a measure that can be precomputed is evaluated once for the whole graph.
pub fn rdd_matrix<K, M>(graph: &OwnedGraph<K>, measure: &M, config: &RddConfig) -> RddMatrix<K>
where
    K: NodeKey,
    M: Measure<K> + Sync + ?Sized,
{
    let prepared = PreparedMeasure::new(measure, graph);
    let nodes: Vec<K> = graph.node_keys().cloned().collect();
    let computed: Vec<Result<RadialProfile<K>>> = nodes
        .par_iter()
        .map(|node| RadialProfile::compute(graph, node, &prepared, config.radius))
        .collect();

    let mut failures = Vec::new();
    let profiles: Vec<Option<RadialProfile<K>>> = nodes
        .iter()
        .zip(computed)
        .map(|(node, result)| match result {
            Ok(profile) => Some(profile),
            Err(error) => {
                warn!(node = ?node, error = %error, "skipping node");
                failures.push(BatchFailure {
                    node: node.clone(),
                    error,
                });
                None
            }
        })
        .collect();

    let n = nodes.len();
    let upper: Vec<Vec<f64>> = (0..n)
        .into_par_iter()
        .map(|i| {
            (i..n)
                .map(|j| match (&profiles[i], &profiles[j]) {
                    (Some(a), Some(b)) => a.distance_to(b, config.weighting),
                    _ => f64::NAN,
                })
                .collect()
        })
        .collect();

    let distances = Array2::from_shape_fn((n, n), |(i, j)| {
        if i <= j {
            upper[i][j - i]
        } else {
            upper[j][i - j]
        }
    });

    RddMatrix {
        nodes,
        distances,
        failures,
    }
}
