use crate::error::{Error, Result};
use crate::graph_traits::NodeKey;
use crate::neighborhood::Neighborhood;
use serde::Serialize;

/// A node reached from a root: its shortest path, the radius it sits at, and the measure
/// attached to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeProfile<K: NodeKey> {
    name: K,
    path: Vec<K>,
    radius: usize,
    measure: f64,
}

impl<K: NodeKey> NodeProfile<K> {
    /// Creates a profile with measure 0. `path` runs from the root to `name` inclusive and
    /// must not be empty.
    pub fn new(name: K, path: Vec<K>) -> NodeProfile<K> {
        debug_assert!(!path.is_empty());
        let radius = path.len().saturating_sub(1);
        NodeProfile {
            name,
            path,
            radius,
            measure: 0.0,
        }
    }

    pub fn name(&self) -> &K {
        &self.name
    }

    pub fn path(&self) -> &[K] {
        &self.path
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    pub fn measure(&self) -> f64 {
        self.measure
    }

    pub fn is_root(&self) -> bool {
        self.radius == 0
    }
}

/// Turns a neighborhood into profiles, one per reached node, in key order.
pub fn populate_profiles<K: NodeKey>(neighborhood: Neighborhood<K>) -> Vec<NodeProfile<K>> {
    neighborhood
        .into_iter()
        .map(|(name, path)| NodeProfile::new(name, path))
        .collect()
}

/// Assigns `measures[i]` to `profiles[i]`.
///
/// Measures are matched by position, not by name. On a length mismatch no profile is
/// touched.
pub fn attach_measures<K: NodeKey>(profiles: &mut [NodeProfile<K>], measures: &[f64]) -> Result<()> {
    if profiles.len() != measures.len() {
        return Err(Error::MeasureCountMismatch {
            expected: profiles.len(),
            actual: measures.len(),
        });
    }
    for (profile, &measure) in profiles.iter_mut().zip(measures) {
        profile.measure = measure;
    }
    Ok(())
}
