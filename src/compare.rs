use crate::config::RddConfig;
use crate::crd::{build_crd, reconcile, CumulativeRadialDistribution};
use crate::error::Result;
use crate::graph::OwnedGraph;
use crate::graph_traits::NodeKey;
use crate::measure::Measure;
use crate::neighborhood::build_neighborhood;
use crate::profile::{attach_measures, populate_profiles, NodeProfile};
use crate::rdd::compute_rdd_with;
use crate::weighting::Weighting;
use tracing::debug;

/// Everything computed around one root: its measured profile table and the resulting CRD.
#[derive(Debug, Clone)]
pub struct RadialProfile<K: NodeKey> {
    root: K,
    profiles: Vec<NodeProfile<K>>,
    crd: CumulativeRadialDistribution,
}

impl<K: NodeKey> RadialProfile<K> {
    pub fn compute<M>(graph: &OwnedGraph<K>, root: &K, measure: &M, radius: usize) -> Result<Self>
    where
        M: Measure<K> + ?Sized,
    {
        let neighborhood = build_neighborhood(graph, root, radius)?;
        let mut profiles = populate_profiles(neighborhood);
        let measures = measure.measure(graph, &profiles)?;
        attach_measures(&mut profiles, &measures)?;
        let crd = build_crd(&profiles);

        debug!(
            root = ?root,
            nodes = profiles.len(),
            max_radius = ?crd.max_radius(),
            "radial profile"
        );

        Ok(RadialProfile {
            root: root.clone(),
            profiles,
            crd,
        })
    }

    pub fn root(&self) -> &K {
        &self.root
    }

    pub fn profiles(&self) -> &[NodeProfile<K>] {
        &self.profiles
    }

    pub fn crd(&self) -> &CumulativeRadialDistribution {
        &self.crd
    }

    pub fn distance_to(&self, other: &RadialProfile<K>, weighting: Weighting) -> f64 {
        compute_rdd_with(&self.crd, &other.crd, weighting)
    }
}

/// Two radial profiles brought to radial parity.
#[derive(Debug, Clone)]
pub struct RadialComparison<K: NodeKey> {
    first: RadialProfile<K>,
    second: RadialProfile<K>,
    crds: (CumulativeRadialDistribution, CumulativeRadialDistribution),
}

impl<K: NodeKey> RadialComparison<K> {
    /// Profiles `u` in `graph_a` and `v` in `graph_b`, or in `graph_a` when `graph_b` is
    /// `None`, and reconciles their CRDs.
    pub fn new<M>(
        graph_a: &OwnedGraph<K>,
        u: &K,
        graph_b: Option<&OwnedGraph<K>>,
        v: &K,
        measure: &M,
        radius: usize,
    ) -> Result<Self>
    where
        M: Measure<K> + ?Sized,
    {
        let first = RadialProfile::compute(graph_a, u, measure, radius)?;
        let second = RadialProfile::compute(graph_b.unwrap_or(graph_a), v, measure, radius)?;
        Ok(RadialComparison::from_profiles(first, second))
    }

    pub fn from_profiles(first: RadialProfile<K>, second: RadialProfile<K>) -> Self {
        let crds = reconcile(first.crd.clone(), second.crd.clone());
        RadialComparison {
            first,
            second,
            crds,
        }
    }

    pub fn first(&self) -> &RadialProfile<K> {
        &self.first
    }

    pub fn second(&self) -> &RadialProfile<K> {
        &self.second
    }

    /// Both CRDs after reconciliation; they have equal length.
    pub fn reconciled(&self) -> (&CumulativeRadialDistribution, &CumulativeRadialDistribution) {
        (&self.crds.0, &self.crds.1)
    }

    pub fn distance(&self, weighting: Weighting) -> f64 {
        let distance = compute_rdd_with(&self.crds.0, &self.crds.1, weighting);
        debug!(
            first = ?self.first.root,
            second = ?self.second.root,
            distance,
            "radial distribution distance"
        );
        distance
    }
}

/// Radial distribution distance between `u` in `graph_a` and `v` in `graph_b` (or `graph_a`
/// when `graph_b` is `None`), using `config.radius` and `config.weighting`.
pub fn rdd_between<K, M>(
    graph_a: &OwnedGraph<K>,
    u: &K,
    graph_b: Option<&OwnedGraph<K>>,
    v: &K,
    measure: &M,
    config: &RddConfig,
) -> Result<f64>
where
    K: NodeKey,
    M: Measure<K> + ?Sized,
{
    let comparison = RadialComparison::new(graph_a, u, graph_b, v, measure, config.radius)?;
    Ok(comparison.distance(config.weighting))
}
