use crate::algo::{self, KatzConfig, PageRankConfig};
use crate::error::{Error, Result};
use crate::graph::OwnedGraph;
use crate::graph_traits::NodeKey;
use crate::profile::NodeProfile;
use serde::{Deserialize, Serialize};

/// Assigns a scalar to every node of a profile table.
///
/// Implementations must return exactly one value per entry of `nodes`, in the same order;
/// values are attached by position.
///
/// Any `Fn(&OwnedGraph<K>, &[NodeProfile<K>]) -> Result<Vec<f64>>` is a measure, so callers
/// can plug in their own metrics next to [`BuiltinMeasure`].
pub trait Measure<K: NodeKey> {
    fn measure(&self, graph: &OwnedGraph<K>, nodes: &[NodeProfile<K>]) -> Result<Vec<f64>>;

    /// Values for every node of `graph`, indexed by node index, when they do not depend on
    /// the profile table. Batches call this once per graph and reuse the result for every
    /// root instead of calling [`Measure::measure`].
    fn precompute(&self, _graph: &OwnedGraph<K>) -> Result<Option<Vec<f64>>> {
        Ok(None)
    }
}

impl<K, F> Measure<K> for F
where
    K: NodeKey,
    F: Fn(&OwnedGraph<K>, &[NodeProfile<K>]) -> Result<Vec<f64>>,
{
    fn measure(&self, graph: &OwnedGraph<K>, nodes: &[NodeProfile<K>]) -> Result<Vec<f64>> {
        self(graph, nodes)
    }
}

/// Which graph a built-in measure is evaluated on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// The full input graph.
    #[default]
    Global,

    /// The subgraph induced by exactly the profiled nodes.
    InducedSubgraph,

    /// The graph formed by the union of the profiled root-to-node paths. Unlike the induced
    /// subgraph it only holds the edges the shortest paths actually use.
    PathSubgraph,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Metric {
    Degree,
    Triangles,
    /// Number of maximal cliques a node belongs to.
    Cliques,
    Katz(KatzConfig),
    Harmonic,
    PageRank(PageRankConfig),
    /// See [`algo::morgan_index`].
    MorganIndex { rounds: usize },
}

impl Metric {
    pub const DEFAULT_MORGAN_ROUNDS: usize = 8;

    pub fn morgan_index() -> Metric {
        Metric::MorganIndex {
            rounds: Self::DEFAULT_MORGAN_ROUNDS,
        }
    }

    pub fn katz() -> Metric {
        Metric::Katz(KatzConfig::default())
    }

    pub fn pagerank() -> Metric {
        Metric::PageRank(PageRankConfig::default())
    }

    /// Value of the metric for every node of `graph`, indexed by node index.
    fn evaluate<K: NodeKey>(&self, graph: &OwnedGraph<K>) -> Result<Vec<f64>> {
        let values = match *self {
            Metric::Degree => graph
                .as_petgraph()
                .node_indices()
                .map(|idx| graph.degree_of(idx) as f64)
                .collect(),
            Metric::Triangles => to_f64(algo::triangles(graph)),
            Metric::Cliques => to_f64(algo::clique_counts(graph)),
            Metric::Katz(ref config) => algo::katz_centrality(graph, config)?,
            Metric::Harmonic => algo::harmonic_centrality(graph),
            Metric::PageRank(ref config) => algo::pagerank(graph, config)?,
            Metric::MorganIndex { rounds } => algo::morgan_index(graph, rounds),
        };
        Ok(values)
    }
}

fn to_f64(counts: Vec<usize>) -> Vec<f64> {
    counts.into_iter().map(|c| c as f64).collect()
}

/// A [`Metric`] evaluated on the graph selected by a [`Scope`].
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuiltinMeasure {
    pub metric: Metric,
    #[serde(default)]
    pub scope: Scope,
}

impl BuiltinMeasure {
    pub fn new(metric: Metric, scope: Scope) -> BuiltinMeasure {
        BuiltinMeasure { metric, scope }
    }

    pub fn global(metric: Metric) -> BuiltinMeasure {
        BuiltinMeasure::new(metric, Scope::Global)
    }

    pub fn induced(metric: Metric) -> BuiltinMeasure {
        BuiltinMeasure::new(metric, Scope::InducedSubgraph)
    }

    pub fn path(metric: Metric) -> BuiltinMeasure {
        BuiltinMeasure::new(metric, Scope::PathSubgraph)
    }
}

impl<K: NodeKey> Measure<K> for BuiltinMeasure {
    fn measure(&self, graph: &OwnedGraph<K>, nodes: &[NodeProfile<K>]) -> Result<Vec<f64>> {
        let local;
        let target = match self.scope {
            Scope::Global => graph,
            Scope::InducedSubgraph => {
                local = graph.induced_subgraph(nodes.iter().map(NodeProfile::name));
                &local
            }
            Scope::PathSubgraph => {
                local = OwnedGraph::from_paths(nodes.iter().map(NodeProfile::path));
                &local
            }
        };

        let values = self.metric.evaluate(target)?;
        lookup(target, &values, nodes)
    }

    fn precompute(&self, graph: &OwnedGraph<K>) -> Result<Option<Vec<f64>>> {
        match self.scope {
            Scope::Global => self.metric.evaluate(graph).map(Some),
            Scope::InducedSubgraph | Scope::PathSubgraph => Ok(None),
        }
    }
}

/// Picks the entries of `values` (indexed by node index of `graph`) for `nodes`.
fn lookup<K: NodeKey>(
    graph: &OwnedGraph<K>,
    values: &[f64],
    nodes: &[NodeProfile<K>],
) -> Result<Vec<f64>> {
    nodes
        .iter()
        .map(|node| {
            graph
                .node_index(node.name())
                .and_then(|idx| values.get(idx.index()).copied())
                .ok_or_else(|| Error::node_not_found(node.name()))
        })
        .collect()
}

/// A measure bound to one graph for the length of a batch.
pub(crate) enum PreparedMeasure<'a, M: ?Sized> {
    /// Measured per profile table.
    Direct(&'a M),
    /// Shared values from [`Measure::precompute`].
    Shared(Vec<f64>),
    /// Precomputation failed; every root fails with this error.
    Failed(Error),
}

impl<'a, M: ?Sized> PreparedMeasure<'a, M> {
    pub(crate) fn new<K>(measure: &'a M, graph: &OwnedGraph<K>) -> Self
    where
        K: NodeKey,
        M: Measure<K>,
    {
        match measure.precompute(graph) {
            Ok(None) => PreparedMeasure::Direct(measure),
            Ok(Some(values)) => PreparedMeasure::Shared(values),
            Err(error) => PreparedMeasure::Failed(error),
        }
    }
}

impl<'a, K, M> Measure<K> for PreparedMeasure<'a, M>
where
    K: NodeKey,
    M: Measure<K> + ?Sized,
{
    fn measure(&self, graph: &OwnedGraph<K>, nodes: &[NodeProfile<K>]) -> Result<Vec<f64>> {
        match *self {
            PreparedMeasure::Direct(measure) => measure.measure(graph, nodes),
            PreparedMeasure::Shared(ref values) => lookup(graph, values, nodes),
            PreparedMeasure::Failed(ref error) => Err(error.clone()),
        }
    }
}
