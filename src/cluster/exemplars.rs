//! Exemplar extraction from the current message state.

use super::graph::SimilarityGraph;

/// Candidate maximizing `a + r` among the outgoing edges of point `i`.
///
/// The first maximum wins. Falls back to `i` itself if no value compares
/// greater than negative infinity (all NaN).
#[must_use]
pub fn best_exemplar(graph: &SimilarityGraph, i: usize) -> usize {
    let mut best = f64::NEG_INFINITY;
    let mut argmax = i;
    for &e in graph.outgoing(i) {
        let edge = &graph.edges()[e];
        let value = edge.a + edge.r;
        if value > best {
            best = value;
            argmax = edge.dst;
        }
    }
    argmax
}

/// Recomputes every point's exemplar in place.
///
/// Returns true if any assignment differs from the previous one; an
/// unassigned (`None`) entry always counts as a change.
pub fn update_exemplars(graph: &SimilarityGraph, exemplars: &mut [Option<usize>]) -> bool {
    let mut changed = false;
    for (i, slot) in exemplars.iter_mut().enumerate() {
        let best = best_exemplar(graph, i);
        if *slot != Some(best) {
            *slot = Some(best);
            changed = true;
        }
    }
    changed
}

/// Sorted distinct exemplar indices.
///
/// # Examples
///
/// ```
/// use exemplar::cluster::cluster_centers;
///
/// assert_eq!(cluster_centers(&[5, 5, 2, 2, 5]), vec![2, 5]);
/// ```
#[must_use]
pub fn cluster_centers(exemplars: &[usize]) -> Vec<usize> {
    let mut centers = exemplars.to_vec();
    centers.sort_unstable();
    centers.dedup();
    centers
}

/// Cluster id in `0..centers.len()` for each point: the position of its
/// exemplar in `centers`.
///
/// `centers` must be the output of [`cluster_centers`] for the same
/// assignment.
#[must_use]
pub fn compact_labels(exemplars: &[usize], centers: &[usize]) -> Vec<usize> {
    exemplars
        .iter()
        .map(|ex| centers.binary_search(ex).unwrap_or_else(|pos| pos))
        .collect()
}
