mod common;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use std::sync::atomic::{AtomicUsize, Ordering};

use common::{radius_measure, sample_graph, short_measure, single_node_graph};
use radial_distribution_distance::graph::OwnedGraph;
use radial_distribution_distance::{
    degree_rdd, rdd_between, rdd_matrix, rdds_from_source, rdds_from_source_across,
    BuiltinMeasure, CumulativeRadialDistribution, Error, KatzConfig, Measure, Metric,
    NodeProfile, RadialComparison, RadialProfile, RddConfig, RddRecord, Result, Scope, Weighting,
};

fn crd(values: &[f64]) -> CumulativeRadialDistribution {
    CumulativeRadialDistribution::from_cumulative(values.to_vec())
}

/// Distance between CRDs [1, 4, 10] and [3, 10, 12].
fn one_vs_two() -> f64 {
    2.0 + 6.0 * (-1.0f64).exp() + 2.0 * (-2.0f64).exp()
}

fn degree() -> BuiltinMeasure {
    BuiltinMeasure::global(Metric::Degree)
}

fn fails_around_five(graph: &OwnedGraph<u32>, nodes: &[NodeProfile<u32>]) -> Result<Vec<f64>> {
    if nodes.iter().any(|n| n.is_root() && *n.name() == 5) {
        return Err(Error::InvalidParameter("root 5".to_string()));
    }
    degree().measure(graph, nodes)
}

/// Global degree that counts how often it is evaluated.
#[derive(Default)]
struct CountingDegree {
    evaluations: AtomicUsize,
}

impl Measure<u32> for CountingDegree {
    fn measure(&self, graph: &OwnedGraph<u32>, nodes: &[NodeProfile<u32>]) -> Result<Vec<f64>> {
        self.evaluations.fetch_add(1, Ordering::SeqCst);
        degree().measure(graph, nodes)
    }

    fn precompute(&self, graph: &OwnedGraph<u32>) -> Result<Option<Vec<f64>>> {
        self.evaluations.fetch_add(1, Ordering::SeqCst);
        degree().precompute(graph)
    }
}

#[test]
fn test_self_distance_is_zero() {
    let g = sample_graph();
    assert_eq!(0.0, rdd_between(&g, &1, None, &1, &degree(), &RddConfig::new(4)).unwrap());
    assert_eq!(0.0, degree_rdd(&g, &1, &1, 4).unwrap());
}

#[test]
fn test_manual_crds_one_vs_six() {
    let g = sample_graph();
    let c = RadialComparison::new(&g, &1, None, &6, &degree(), 2).unwrap();

    assert_eq!(&crd(&[1.0, 4.0, 10.0]), c.first().crd());
    assert_eq!(&crd(&[1.0, 4.0, 10.0]), c.second().crd());
    assert_eq!(0.0, c.distance(Weighting::ExponentialDecay));
    assert_eq!(0.0, degree_rdd(&g, &1, &6, 2).unwrap());
}

#[test]
fn test_one_vs_two() {
    let g = sample_graph();
    let c = RadialComparison::new(&g, &1, None, &2, &degree(), 2).unwrap();
    assert_eq!(&crd(&[3.0, 10.0, 12.0]), c.second().crd());
    assert_relative_eq!(one_vs_two(), c.distance(Weighting::ExponentialDecay));
    assert_relative_eq!(one_vs_two(), degree_rdd(&g, &2, &1, 2).unwrap());
}

#[test]
fn test_radial_parity() {
    // Node 1 reaches radius 3 while node 2 stops at radius 2.
    let g = sample_graph();
    let c = RadialComparison::new(&g, &1, None, &2, &degree(), 4).unwrap();
    assert_eq!(&crd(&[1.0, 4.0, 10.0, 12.0]), c.first().crd());
    assert_eq!(&crd(&[3.0, 10.0, 12.0]), c.second().crd());

    let (a, b) = c.reconciled();
    assert_eq!(&crd(&[1.0, 4.0, 10.0, 12.0]), a);
    assert_eq!(&crd(&[3.0, 10.0, 12.0, 12.0]), b);
    assert_relative_eq!(one_vs_two(), c.distance(Weighting::ExponentialDecay));
}

#[test]
fn test_single_isolated_node() {
    let g = single_node_graph();
    for metric in [Metric::Degree, Metric::Cliques, Metric::pagerank(), Metric::katz()] {
        let measure = BuiltinMeasure::global(metric);
        let p = RadialProfile::compute(&g, &42, &measure, 3).unwrap();
        assert_eq!(1, p.crd().len());
        assert_eq!(0.0, rdd_between(&g, &42, None, &42, &measure, &RddConfig::default()).unwrap());
    }
}

#[test]
fn test_two_graphs() {
    let g1 = sample_graph();
    let g2 = OwnedGraph::from_edges(vec![(1, 2), (2, 4), (2, 3), (3, 5), (4, 5), (5, 6)]);

    let c = RadialComparison::new(&g1, &1, Some(&g2), &1, &degree(), 4).unwrap();
    assert_eq!(&crd(&[1.0, 4.0, 8.0, 11.0, 12.0]), c.second().crd());

    let expected = 2.0 * (-2.0f64).exp() + (-3.0f64).exp();
    let d = rdd_between(&g1, &1, Some(&g2), &1, &degree(), &RddConfig::new(4)).unwrap();
    assert_relative_eq!(expected, d);
}

#[test]
fn test_missing_nodes() {
    let g = sample_graph();
    let other = OwnedGraph::from_edges(vec![(7, 8)]);
    let config = RddConfig::default();

    assert_eq!(
        Err(Error::NodeNotFound("99".to_string())),
        rdd_between(&g, &1, None, &99, &degree(), &config)
    );
    assert_eq!(
        Err(Error::NodeNotFound("1".to_string())),
        rdd_between(&g, &1, Some(&other), &1, &degree(), &config)
    );
}

#[test]
fn test_measure_count_mismatch() {
    let g = sample_graph();
    assert_eq!(
        Err(Error::MeasureCountMismatch {
            expected: 4,
            actual: 3
        }),
        rdd_between(&g, &1, None, &1, &short_measure, &RddConfig::new(2))
    );
}

#[test]
fn test_induced_and_path_scopes_differ() {
    let g = sample_graph();

    let induced = RadialProfile::compute(&g, &1, &BuiltinMeasure::induced(Metric::Degree), 2);
    assert_eq!(&crd(&[1.0, 4.0, 8.0]), induced.unwrap().crd());

    // The path union drops the 3 - 4 edge.
    let path = RadialProfile::compute(&g, &1, &BuiltinMeasure::path(Metric::Degree), 2);
    assert_eq!(&crd(&[1.0, 4.0, 6.0]), path.unwrap().crd());
}

#[test]
fn test_global_measure_rejects_foreign_profiles() {
    let g = sample_graph();
    let profiles = vec![NodeProfile::new(99, vec![99])];
    assert_eq!(
        Err(Error::NodeNotFound("99".to_string())),
        degree().measure(&g, &profiles)
    );
}

#[test]
fn test_custom_measure() {
    let g = sample_graph();
    let p = RadialProfile::compute(&g, &1, &radius_measure, 2).unwrap();
    assert_eq!(&crd(&[0.0, 1.0, 5.0]), p.crd());
    assert_eq!(4, p.profiles().len());
}

#[test]
fn test_triangle_measure() {
    let g = sample_graph();
    let p = RadialProfile::compute(&g, &2, &BuiltinMeasure::global(Metric::Triangles), 1).unwrap();
    assert_eq!(&crd(&[1.0, 3.0]), p.crd());
}

#[test]
fn test_every_builtin_measure_is_zero_on_itself() {
    let g = sample_graph();
    let metrics = [
        Metric::Degree,
        Metric::Triangles,
        Metric::Cliques,
        Metric::katz(),
        Metric::Harmonic,
        Metric::pagerank(),
        Metric::morgan_index(),
    ];
    let scopes = [Scope::Global, Scope::InducedSubgraph, Scope::PathSubgraph];
    for &metric in &metrics {
        for &scope in &scopes {
            let measure = BuiltinMeasure::new(metric, scope);
            let d = rdd_between(&g, &3, None, &3, &measure, &RddConfig::new(3)).unwrap();
            assert_eq!(0.0, d, "{:?}", measure);
        }
    }
}

#[test]
fn test_katz_divergence_propagates() {
    let mut edges = Vec::new();
    for a in 0..12u32 {
        for b in a + 1..12 {
            edges.push((a, b));
        }
    }
    let g = OwnedGraph::from_edges(edges);
    let measure = BuiltinMeasure::global(Metric::Katz(KatzConfig {
        max_iterations: 20,
        ..KatzConfig::default()
    }));
    assert_eq!(
        Err(Error::NonTerminatingIteration {
            algorithm: "katz",
            iterations: 20
        }),
        rdd_between(&g, &0, None, &1, &measure, &RddConfig::new(1))
    );
}

#[test]
fn test_log_scale_weighting() {
    let g = sample_graph();
    let config = RddConfig::new(2).with_weighting(Weighting::LogScale);
    let d = rdd_between(&g, &1, None, &2, &degree(), &config).unwrap();
    assert_relative_eq!(30.0 + 2.0 * 2.0f64.ln(), d);
}

#[test]
fn test_string_keys() {
    let g = OwnedGraph::from_edges(vec![
        ("a".to_string(), "b".to_string()),
        ("b".to_string(), "c".to_string()),
    ]);
    let d = degree_rdd(&g, &"a".to_string(), &"b".to_string(), 2).unwrap();
    // CRDs [1, 3, 4] and [2, 4, 4]
    assert_relative_eq!(1.0 + (-1.0f64).exp(), d);
}

#[test]
fn test_rdds_from_source() {
    let g = sample_graph();
    let report = rdds_from_source(&g, &1, &degree(), &RddConfig::new(2)).unwrap();

    assert!(report.is_complete());
    let nodes: Vec<u32> = report.records.iter().map(|r| r.node).collect();
    assert_eq!(vec![1, 2, 3, 4, 5, 6], nodes);

    assert_eq!(0.0, report.get(&1).unwrap().rdd);
    assert_eq!(0.0, report.get(&6).unwrap().rdd);
    for node in [2, 3, 4] {
        let record = report.get(&node).unwrap();
        assert_relative_eq!(one_vs_two(), record.rdd);
        assert_eq!(3, record.degree);
    }
}

#[test]
fn test_batch_skips_failing_nodes() {
    let g = sample_graph();
    let config = RddConfig::new(2);

    let report = rdds_from_source(&g, &1, &fails_around_five, &config).unwrap();
    assert_eq!(5, report.records.len());
    assert_eq!(1, report.failures.len());
    assert_eq!(5, report.failures[0].node);
    assert!(report.get(&5).is_none());

    assert_eq!(
        Err(Error::InvalidParameter("root 5".to_string())),
        rdds_from_source(&g, &5, &fails_around_five, &config).map(|r| r.records.len())
    );
}

#[test]
fn test_rdds_across_graphs() {
    let g1 = sample_graph();
    let g2 = OwnedGraph::from_edges(vec![(1, 2), (2, 4), (2, 3), (3, 5), (4, 5), (5, 6)]);
    let report = rdds_from_source_across(&g1, &1, &g2, &degree(), &RddConfig::new(4)).unwrap();

    assert_eq!(6, report.records.len());
    assert_eq!(2, report.get(&3).unwrap().degree);
    assert_relative_eq!(
        2.0 * (-2.0f64).exp() + (-3.0f64).exp(),
        report.get(&1).unwrap().rdd
    );
}

#[test]
fn test_rdd_matrix() {
    let g = sample_graph();
    let m = rdd_matrix(&g, &degree(), &RddConfig::new(2));

    assert!(m.failures().is_empty());
    assert_eq!(&[1, 2, 3, 4, 5, 6], m.nodes());
    assert_eq!((6, 6), m.distances().dim());
    for i in 0..6 {
        assert_eq!(0.0, m.distances()[(i, i)]);
        for j in 0..6 {
            assert_eq!(m.distances()[(i, j)], m.distances()[(j, i)]);
        }
    }
    assert_relative_eq!(one_vs_two(), m.get(&1, &2).unwrap());
    assert_eq!(Some(0.0), m.get(&2, &4));
    assert_eq!(None, m.get(&1, &9));
    assert_abs_diff_eq!(one_vs_two(), m.row(&5).unwrap()[2]);
}

#[test]
fn test_rdd_matrix_marks_failures() {
    let g = sample_graph();
    let m = rdd_matrix(&g, &fails_around_five, &RddConfig::new(2));

    assert_eq!(1, m.failures().len());
    assert!(m.get(&5, &1).unwrap().is_nan());
    assert!(m.get(&1, &5).unwrap().is_nan());
    assert!(m.get(&5, &5).unwrap().is_nan());
    assert_eq!(Some(0.0), m.get(&1, &6));
}

#[test]
fn test_batch_evaluates_global_measure_once_per_graph() {
    let g1 = sample_graph();
    let g2 = OwnedGraph::from_edges(vec![(1, 2), (2, 4), (2, 3), (3, 5), (4, 5), (5, 6)]);
    let config = RddConfig::new(2);

    let counting = CountingDegree::default();
    let report = rdds_from_source(&g1, &1, &counting, &config).unwrap();
    assert_eq!(6, report.records.len());
    assert_eq!(1, counting.evaluations.load(Ordering::SeqCst));

    let counting = CountingDegree::default();
    rdds_from_source_across(&g1, &1, &g2, &counting, &config).unwrap();
    assert_eq!(2, counting.evaluations.load(Ordering::SeqCst));

    let counting = CountingDegree::default();
    let m = rdd_matrix(&g1, &counting, &config);
    assert!(m.failures().is_empty());
    assert_eq!(1, counting.evaluations.load(Ordering::SeqCst));
}

#[test]
fn test_shared_global_values_match_pairwise_distances() {
    let g = sample_graph();
    let config = RddConfig::new(3);
    let measure = BuiltinMeasure::global(Metric::Harmonic);

    let report = rdds_from_source(&g, &1, &measure, &config).unwrap();
    let m = rdd_matrix(&g, &measure, &config);
    for record in &report.records {
        let expected = rdd_between(&g, &1, None, &record.node, &measure, &config).unwrap();
        assert_relative_eq!(expected, record.rdd);
        assert_relative_eq!(expected, m.get(&1, &record.node).unwrap());
    }
}

#[test]
fn test_batch_records_global_measure_failure_per_target() {
    let mut edges = Vec::new();
    for a in 0..12u32 {
        for b in a + 1..12 {
            edges.push((a, b));
        }
    }
    let diverging = OwnedGraph::from_edges(edges);
    let measure = BuiltinMeasure::global(Metric::Katz(KatzConfig {
        max_iterations: 20,
        ..KatzConfig::default()
    }));

    let report =
        rdds_from_source_across(&sample_graph(), &1, &diverging, &measure, &RddConfig::new(1))
            .unwrap();
    assert!(report.records.is_empty());
    assert_eq!(12, report.failures.len());
    for failure in &report.failures {
        assert_eq!(
            Error::NonTerminatingIteration {
                algorithm: "katz",
                iterations: 20
            },
            failure.error
        );
    }

    assert!(rdds_from_source(&diverging, &0, &measure, &RddConfig::new(1)).is_err());
}

#[test]
fn test_log_rdd() {
    let record = RddRecord {
        node: 1u32,
        rdd: 100.0,
        degree: 1,
    };
    assert_relative_eq!(2.0, record.log_rdd());
    assert_eq!(0.0, RddRecord { rdd: 0.0, ..record }.log_rdd());
}
