//! Cumulative radial distributions (CRDs) and radial parity between them.
//!
//! A CRD holds, for every radius `r` from 0 up to the largest radius observed around a
//! root, the sum of the measures of all nodes at radius `<= r`. It only is non-decreasing
//! when every measure is non-negative.

use crate::graph_traits::NodeKey;
use crate::profile::NodeProfile;
use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CumulativeRadialDistribution {
    values: Vec<f64>,
}

impl CumulativeRadialDistribution {
    /// Wraps already accumulated values, `values[r]` being the cumulative value at radius `r`.
    pub fn from_cumulative(values: Vec<f64>) -> CumulativeRadialDistribution {
        CumulativeRadialDistribution { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn max_radius(&self) -> Option<usize> {
        self.values.len().checked_sub(1)
    }

    pub fn get(&self, radius: usize) -> Option<f64> {
        self.values.get(radius).copied()
    }

    /// The cumulative value at `radius`. Beyond the last radius the total no longer changes,
    /// so the final value is returned; an empty distribution reads as 0.
    pub fn value_at(&self, radius: usize) -> f64 {
        match self.values.get(radius) {
            Some(&v) => v,
            None => self.values.last().copied().unwrap_or(0.0),
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Repeats the final value until the distribution covers `len` radii.
    fn extend_to(&mut self, len: usize) {
        let last = self.values.last().copied().unwrap_or(0.0);
        if self.values.len() < len {
            self.values.resize(len, last);
        }
    }
}

/// Builds the CRD of a profile table.
///
/// Radii without any node contribute 0, so the result always has `max radius + 1` entries.
/// An empty table gives an empty CRD.
pub fn build_crd<K: NodeKey>(profiles: &[NodeProfile<K>]) -> CumulativeRadialDistribution {
    let len = match profiles.iter().map(NodeProfile::radius).max() {
        Some(max_radius) => max_radius + 1,
        None => return CumulativeRadialDistribution::default(),
    };

    let mut values = vec![0.0; len];
    for profile in profiles {
        values[profile.radius()] += profile.measure();
    }
    for r in 1..len {
        values[r] += values[r - 1];
    }
    CumulativeRadialDistribution { values }
}

/// Brings two CRDs to the same length by extending the shorter one with its final value.
/// The longer one is returned untouched.
pub fn reconcile(
    mut crd1: CumulativeRadialDistribution,
    mut crd2: CumulativeRadialDistribution,
) -> (CumulativeRadialDistribution, CumulativeRadialDistribution) {
    let len = crd1.len().max(crd2.len());
    crd1.extend_to(len);
    crd2.extend_to(len);
    (crd1, crd2)
}

/// The radii covered by at least one of two CRDs.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RadiusUnionDomain {
    len: usize,
}

impl RadiusUnionDomain {
    pub fn of(
        crd1: &CumulativeRadialDistribution,
        crd2: &CumulativeRadialDistribution,
    ) -> RadiusUnionDomain {
        RadiusUnionDomain {
            len: crd1.len().max(crd2.len()),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Radii in ascending order.
    pub fn radii(&self) -> Range<usize> {
        0..self.len
    }
}

impl AbsDiffEq for CumulativeRadialDistribution {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.len() == other.len()
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for CumulativeRadialDistribution {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.len() == other.len()
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
