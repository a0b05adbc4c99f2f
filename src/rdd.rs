use crate::crd::{CumulativeRadialDistribution, RadiusUnionDomain};
use crate::weighting::Weighting;

/// Radial distribution distance between two CRDs with the default exponential decay.
pub fn compute_rdd(
    crd1: &CumulativeRadialDistribution,
    crd2: &CumulativeRadialDistribution,
) -> f64 {
    compute_rdd_with(crd1, crd2, Weighting::default())
}

/// `sum over r of weighting(r) * |crd1[r] - crd2[r]|`, with `r` running over the union of
/// both radius domains in ascending order.
///
/// A radius past the end of one distribution reads as that distribution's final value, so
/// the result is the same whether or not the inputs were reconciled first.
pub fn compute_rdd_with(
    crd1: &CumulativeRadialDistribution,
    crd2: &CumulativeRadialDistribution,
    weighting: Weighting,
) -> f64 {
    RadiusUnionDomain::of(crd1, crd2)
        .radii()
        .map(|r| weighting.weight(r) * (crd1.value_at(r) - crd2.value_at(r)).abs())
        .sum()
}
