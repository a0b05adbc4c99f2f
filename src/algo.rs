//! Structural node metrics computed over an [`OwnedGraph`].
//!
//! Traversal, shortest distances and clique enumeration come from petgraph. Centralities that
//! are defined by a power iteration run over petgraph's adjacency with bounded iteration
//! counts. Every function returns one value per node, indexed by `NodeIndex::index()`.

use crate::error::{Error, Result};
use crate::graph::OwnedGraph;
use crate::graph_traits::NodeKey;
use ndarray::Array1;
use petgraph::algo::{dijkstra, maximal_cliques};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

/// What an iterative metric does when it reaches its iteration bound without converging.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvergencePolicy {
    /// Fail with [`Error::NonTerminatingIteration`].
    #[default]
    Fail,

    /// Log a warning and use the last iterate.
    Warn,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRankConfig {
    /// Probability of following an edge rather than teleporting.
    pub damping_factor: f64,
    pub max_iterations: usize,
    /// Per-node tolerance; iteration stops once the L1 change drops below `n * tolerance`.
    pub tolerance: f64,
    pub on_non_convergence: ConvergencePolicy,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        PageRankConfig {
            damping_factor: 0.85,
            max_iterations: 1000,
            tolerance: 1e-6,
            on_non_convergence: ConvergencePolicy::Fail,
        }
    }
}

impl PageRankConfig {
    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.damping_factor) {
            return Err(Error::InvalidParameter(format!(
                "pagerank damping factor {} outside [0, 1]",
                self.damping_factor
            )));
        }
        validate_bounds("pagerank", self.max_iterations, self.tolerance)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KatzConfig {
    /// Attenuation factor. Must stay below the inverse of the largest adjacency eigenvalue
    /// for the iteration to converge.
    pub alpha: f64,
    /// Baseline centrality given to every node.
    pub beta: f64,
    pub max_iterations: usize,
    pub tolerance: f64,
    pub on_non_convergence: ConvergencePolicy,
}

impl Default for KatzConfig {
    fn default() -> Self {
        KatzConfig {
            alpha: 0.1,
            beta: 1.0,
            max_iterations: 1000,
            tolerance: 1e-6,
            on_non_convergence: ConvergencePolicy::Fail,
        }
    }
}

impl KatzConfig {
    fn validate(&self) -> Result<()> {
        if !(self.alpha > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "katz alpha {} must be positive",
                self.alpha
            )));
        }
        validate_bounds("katz", self.max_iterations, self.tolerance)
    }
}

fn validate_bounds(algorithm: &str, max_iterations: usize, tolerance: f64) -> Result<()> {
    if max_iterations == 0 {
        return Err(Error::InvalidParameter(format!(
            "{} needs at least one iteration",
            algorithm
        )));
    }
    if !(tolerance > 0.0) {
        return Err(Error::InvalidParameter(format!(
            "{} tolerance {} must be positive",
            algorithm, tolerance
        )));
    }
    Ok(())
}

fn not_converged(
    algorithm: &'static str,
    iterations: usize,
    policy: ConvergencePolicy,
    last: Array1<f64>,
) -> Result<Vec<f64>> {
    match policy {
        ConvergencePolicy::Fail => Err(Error::NonTerminatingIteration {
            algorithm,
            iterations,
        }),
        ConvergencePolicy::Warn => {
            warn!(algorithm, iterations, "no convergence, using last iterate");
            Ok(last.to_vec())
        }
    }
}

/// Number of triangles each node is part of.
pub fn triangles<K: NodeKey>(graph: &OwnedGraph<K>) -> Vec<usize> {
    let g = graph.as_petgraph();
    g.node_indices()
        .map(|u| {
            let neighbors: Vec<_> = g.neighbors(u).collect();
            let mut count = 0;
            for (i, &v) in neighbors.iter().enumerate() {
                for &w in &neighbors[i + 1..] {
                    if g.contains_edge(v, w) {
                        count += 1;
                    }
                }
            }
            count
        })
        .collect()
}

/// Number of maximal cliques each node belongs to. An isolated node forms a clique of its own.
pub fn clique_counts<K: NodeKey>(graph: &OwnedGraph<K>) -> Vec<usize> {
    let g = graph.as_petgraph();
    let mut counts = vec![0; g.node_count()];
    for clique in maximal_cliques(g) {
        for node in clique {
            counts[node.index()] += 1;
        }
    }
    counts
}

/// Sum of inverse shortest-path distances to every other reachable node.
pub fn harmonic_centrality<K: NodeKey>(graph: &OwnedGraph<K>) -> Vec<f64> {
    let g = graph.as_petgraph();
    g.node_indices()
        .map(|u| {
            let mut distances: Vec<_> = dijkstra(g, u, None, |_| 1usize)
                .into_iter()
                .filter(|&(v, d)| v != u && d > 0)
                .collect();
            // fixed summation order
            distances.sort_unstable_by_key(|&(v, _)| v);
            distances.iter().map(|&(_, d)| 1.0 / d as f64).sum()
        })
        .collect()
}

/// Katz centrality by power iteration of `x <- alpha * A x + beta`, L2-normalised.
pub fn katz_centrality<K: NodeKey>(graph: &OwnedGraph<K>, config: &KatzConfig) -> Result<Vec<f64>> {
    config.validate()?;
    let g = graph.as_petgraph();
    let n = g.node_count();
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut x = Array1::<f64>::zeros(n);
    for iteration in 1..=config.max_iterations {
        let mut next = Array1::<f64>::zeros(n);
        for u in g.node_indices() {
            let xu = x[u.index()];
            for v in g.neighbors(u) {
                next[v.index()] += xu;
            }
        }
        next.mapv_inplace(|s| config.alpha * s + config.beta);

        let err: f64 = (&next - &x).mapv(f64::abs).sum();
        x = next;
        if err < n as f64 * config.tolerance {
            trace!(iterations = iteration, "katz converged");
            return Ok(normalized(x).to_vec());
        }
    }
    not_converged(
        "katz",
        config.max_iterations,
        config.on_non_convergence,
        normalized(x),
    )
}

fn normalized(x: Array1<f64>) -> Array1<f64> {
    let norm = x.dot(&x).sqrt();
    if norm > 0.0 && norm.is_finite() {
        x / norm
    } else {
        x
    }
}

/// PageRank by power iteration. Nodes without neighbors spread their mass uniformly.
pub fn pagerank<K: NodeKey>(graph: &OwnedGraph<K>, config: &PageRankConfig) -> Result<Vec<f64>> {
    config.validate()?;
    let g = graph.as_petgraph();
    let n = g.node_count();
    if n == 0 {
        return Ok(Vec::new());
    }

    let n_f64 = n as f64;
    let d = config.damping_factor;
    let out_degrees: Vec<usize> = g.node_indices().map(|i| g.neighbors(i).count()).collect();

    let mut scores = Array1::from_elem(n, 1.0 / n_f64);
    for iteration in 1..=config.max_iterations {
        let dangling_sum: f64 = out_degrees
            .iter()
            .zip(scores.iter())
            .filter(|(&deg, _)| deg == 0)
            .map(|(_, &s)| s)
            .sum();

        let mut next = Array1::from_elem(n, (d * dangling_sum + (1.0 - d)) / n_f64);
        for u in g.node_indices() {
            let deg = out_degrees[u.index()];
            if deg > 0 {
                let share = d * scores[u.index()] / deg as f64;
                for v in g.neighbors(u) {
                    next[v.index()] += share;
                }
            }
        }

        let err: f64 = (&next - &scores).mapv(f64::abs).sum();
        scores = next;
        if err < n_f64 * config.tolerance {
            trace!(iterations = iteration, "pagerank converged");
            return Ok(scores.to_vec());
        }
    }
    not_converged(
        "pagerank",
        config.max_iterations,
        config.on_non_convergence,
        scores,
    )
}

/// Morgan-style index: every node starts at 1 and each further round replaces a node's value
/// by the sum of its neighbors' values. `rounds` includes the seeding round.
pub fn morgan_index<K: NodeKey>(graph: &OwnedGraph<K>, rounds: usize) -> Vec<f64> {
    let g = graph.as_petgraph();
    let n = g.node_count();
    let mut values = Array1::<f64>::ones(n);
    for _ in 1..rounds {
        let mut next = Array1::<f64>::zeros(n);
        for u in g.node_indices() {
            next[u.index()] = g.neighbors(u).map(|v| values[v.index()]).sum();
        }
        values = next;
    }
    values.to_vec()
}
