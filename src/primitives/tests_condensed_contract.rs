// =========================================================================
// FALSIFY-CS: Condensed similarity layout contract
//
// The condensed array is the only way similarities enter the library, so a
// silent layout error would reorder every edge of the similarity graph.
//
// References:
//   - SciPy `scipy.spatial.distance.squareform` condensed layout
// =========================================================================

use super::*;

/// FALSIFY-CS-001: Length is n(n-1)/2 for every accepted point count
#[test]
fn falsify_cs_001_length_formula() {
    for n in 1..12 {
        let s = CondensedSimilarity::from_fn(n, |_, _| 0.0).expect("valid");
        assert_eq!(
            s.len(),
            n * (n - 1) / 2,
            "FALSIFIED CS-001: n={n} produced {} pairs",
            s.len()
        );
    }
}

/// FALSIFY-CS-002: from_fn enumerates pairs in row-major upper-triangle order
#[test]
fn falsify_cs_002_row_major_order() {
    let s = CondensedSimilarity::from_fn(5, |i, j| (i * 100 + j) as f64).expect("valid");
    let expected: Vec<f64> = vec![
        1.0, 2.0, 3.0, 4.0, 102.0, 103.0, 104.0, 203.0, 204.0, 304.0,
    ];
    assert_eq!(
        s.as_slice(),
        expected.as_slice(),
        "FALSIFIED CS-002: condensed order differs from row-major upper triangle"
    );
}

/// FALSIFY-CS-003: condensed_index agrees with from_fn enumeration
#[test]
fn falsify_cs_003_index_matches_enumeration() {
    let n = 7;
    let s = CondensedSimilarity::from_fn(n, |i, j| (i * n + j) as f64).expect("valid");
    for i in 0..n {
        for j in (i + 1)..n {
            let idx = condensed_index(n, i, j);
            assert_eq!(
                s.as_slice()[idx],
                (i * n + j) as f64,
                "FALSIFIED CS-003: index({i},{j})={idx} points at the wrong pair"
            );
        }
    }
}

/// FALSIFY-CS-004: Every mismatched length is rejected
#[test]
fn falsify_cs_004_length_mismatch_rejected() {
    for len in [0usize, 2, 4, 7] {
        let result = CondensedSimilarity::from_vec(4, vec![0.0; len]);
        assert!(
            result.is_err(),
            "FALSIFIED CS-004: 4 points accepted {len} similarities"
        );
    }
}
