// =========================================================================
// FALSIFY-AP: Affinity Propagation contract
//
// Each test names a behaviour that, if it broke, would silently change the
// clustering a caller gets back rather than fail loudly.
//
// References:
//   - Frey & Dueck (2007) "Clustering by Passing Messages Between Data Points"
// =========================================================================

use super::*;
use crate::cluster::exemplars::best_exemplar;

fn three_blobs() -> CondensedSimilarity {
    let points: Vec<Vec<f64>> = [0.0, 0.5, 1.0, 20.0, 20.5, 21.0, 40.0, 40.5, 41.0]
        .iter()
        .map(|&x| vec![x])
        .collect();
    CondensedSimilarity::negative_squared_euclidean(&points).expect("valid points")
}

fn n_distinct(exemplars: &[usize]) -> usize {
    cluster_centers(exemplars).len()
}

/// FALSIFY-AP-001: Output has one in-range exemplar per point
#[test]
fn falsify_ap_001_output_shape_and_range() {
    let s = three_blobs();
    let mut ap = AffinityPropagation::new().with_random_state(1);
    let exemplars = ap.run(s.as_slice(), s.n_points()).expect("valid");
    assert_eq!(exemplars.len(), 9, "FALSIFIED AP-001: wrong output length");
    for (i, &ex) in exemplars.iter().enumerate() {
        assert!(ex < 9, "FALSIFIED AP-001: point {i} -> {ex} out of range");
    }
}

/// FALSIFY-AP-002: Never runs more than max_iter rounds
#[test]
fn falsify_ap_002_terminates_within_max_iter() {
    let s = three_blobs();
    for max_iter in [1, 2, 7, 40] {
        let mut ap = AffinityPropagation::new()
            .with_max_iter(max_iter)
            .with_random_state(2);
        ap.fit(&s).expect("valid");
        assert!(
            ap.n_iter() <= max_iter,
            "FALSIFIED AP-002: n_iter={} > max_iter={max_iter}",
            ap.n_iter()
        );
    }
}

/// FALSIFY-AP-003: Stronger preference policies never yield fewer clusters
#[test]
fn falsify_ap_003_preference_policy_ordering() {
    let s = three_blobs();
    let count = |preference| {
        let mut ap = AffinityPropagation::new()
            .with_preference(preference)
            .with_random_state(3);
        n_distinct(&ap.run(s.as_slice(), s.n_points()).expect("valid"))
    };
    let median = count(Preference::Median);
    let minimum = count(Preference::Minimum);
    let extrapolated = count(Preference::ExtrapolatedMinimum);
    assert_eq!(median, 3, "FALSIFIED AP-003: median found {median} clusters");
    assert!(
        extrapolated <= minimum && minimum <= median,
        "FALSIFIED AP-003: counts median={median} min={minimum} extrapolated={extrapolated}"
    );
}

/// FALSIFY-AP-004: Lowering a fixed preference never adds cluster centers
#[test]
fn falsify_ap_004_preference_monotonicity() {
    let points = vec![
        vec![0.0, 0.0],
        vec![0.1, 0.1],
        vec![0.2, 0.0],
        vec![10.0, 10.0],
        vec![10.1, 10.1],
        vec![10.2, 10.0],
    ];
    let s = CondensedSimilarity::negative_squared_euclidean(&points).expect("valid");
    let mut previous = usize::MAX;
    for preference in [0.0, -0.05, -1.0, -100.0, -1000.0] {
        let mut ap = AffinityPropagation::new()
            .with_preference(Preference::Fixed(preference))
            .with_random_state(4);
        let k = n_distinct(&ap.run(s.as_slice(), 6).expect("valid"));
        assert!(
            k <= previous,
            "FALSIFIED AP-004: preference={preference} gave {k} > {previous} centers"
        );
        previous = k;
    }
    assert_eq!(previous, 1, "FALSIFIED AP-004: very low preference kept {previous} centers");
}

/// FALSIFY-AP-005: Identical seeds give identical assignments
#[test]
fn falsify_ap_005_seeded_determinism() {
    let s = three_blobs();
    let run = |seed| {
        let mut ap = AffinityPropagation::new()
            .with_preference(Preference::Minimum)
            .with_random_state(seed);
        (ap.run(s.as_slice(), 9).expect("valid"), ap.n_iter())
    };
    assert_eq!(run(77), run(77), "FALSIFIED AP-005: same seed diverged");
}

/// FALSIFY-AP-006: Self-chosen centers stay centers on the final messages
#[test]
fn falsify_ap_006_centers_are_fixed_points() {
    let s = three_blobs();
    let mut rng = StdRng::seed_from_u64(6);
    let mut graph =
        SimilarityGraph::build(s.as_slice(), 9, Preference::Median, &mut rng).expect("valid");
    let outcome = iterate(&mut graph, 0.9, 1000, 50);
    for (i, &ex) in outcome.exemplars.iter().enumerate() {
        if ex == i {
            assert_eq!(
                best_exemplar(&graph, i),
                i,
                "FALSIFIED AP-006: center {i} moved on re-extraction"
            );
        }
    }
}

/// FALSIFY-AP-007: The highest-indexed point only ever sees its self edge
#[test]
fn falsify_ap_007_last_point_self_exemplar() {
    let s = three_blobs();
    for preference in [
        Preference::Median,
        Preference::Minimum,
        Preference::ExtrapolatedMinimum,
    ] {
        let mut ap = AffinityPropagation::new()
            .with_preference(preference)
            .with_random_state(7);
        let exemplars = ap.run(s.as_slice(), 9).expect("valid");
        assert_eq!(
            exemplars[8], 8,
            "FALSIFIED AP-007: last point chose {} under {preference:?}",
            exemplars[8]
        );
    }
}
