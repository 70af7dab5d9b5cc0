//! Responsibility and availability updates.
//!
//! One round is [`update_responsibilities`] followed by
//! [`update_availabilities`]. Each pass reads only values written by the
//! previous pass, so points within a pass are independent.

use super::graph::SimilarityGraph;

/// Exponential damping: `damping * old + (1 - damping) * new`.
#[inline]
fn damp(old: f64, new: f64, damping: f64) -> f64 {
    damping * old + (1.0 - damping) * new
}

/// Running maximum and second maximum in a single pass.
#[derive(Debug, Clone, Copy)]
struct TopTwo {
    first: f64,
    second: f64,
    argmax: Option<usize>,
}

impl TopTwo {
    fn new() -> Self {
        Self {
            first: f64::NEG_INFINITY,
            second: f64::NEG_INFINITY,
            argmax: None,
        }
    }

    /// First occurrence of the maximum keeps the argmax.
    fn offer(&mut self, pos: usize, value: f64) {
        if value > self.first {
            self.second = self.first;
            self.first = value;
            self.argmax = Some(pos);
        } else if value > self.second {
            self.second = value;
        }
    }
}

/// Updates r(i, k) for every outgoing edge of every point.
///
/// `r(i,k) <- s(i,k) - max_{k' != k} (s(i,k') + a(i,k'))`, damped.
pub fn update_responsibilities(graph: &mut SimilarityGraph, damping: f64) {
    let SimilarityGraph {
        edges, outgoing, ..
    } = graph;

    for out in outgoing.iter() {
        let mut top = TopTwo::new();
        for (pos, &e) in out.iter().enumerate() {
            top.offer(pos, edges[e].s + edges[e].a);
        }
        for (pos, &e) in out.iter().enumerate() {
            let competitor = if Some(pos) == top.argmax {
                top.second
            } else {
                top.first
            };
            let edge = &mut edges[e];
            edge.r = damp(edge.r, edge.s - competitor, damping);
        }
    }
}

/// Updates a(i, k) for every incoming edge of every candidate exemplar.
///
/// For `i != k`: `a(i,k) <- min(0, r(k,k) + sum_{i' != i,k} max(0, r(i',k)))`;
/// for the self edge: `a(k,k) <- sum_{i' != k} max(0, r(i',k))`. Both damped.
pub fn update_availabilities(graph: &mut SimilarityGraph, damping: f64) {
    let SimilarityGraph {
        edges, incoming, ..
    } = graph;

    for inc in incoming.iter() {
        let Some((&self_edge, others)) = inc.split_last() else {
            continue;
        };
        let support: f64 = others.iter().map(|&e| edges[e].r.max(0.0)).sum();
        let rkk = edges[self_edge].r;

        for &e in others {
            let edge = &mut edges[e];
            let target = (rkk + support - edge.r.max(0.0)).min(0.0);
            edge.a = damp(edge.a, target, damping);
        }
        let edge = &mut edges[self_edge];
        edge.a = damp(edge.a, support, damping);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::graph::{Preference, SimilarityGraph};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn graph(sims: &[f64], n: usize, preference: Preference) -> SimilarityGraph {
        let mut rng = StdRng::seed_from_u64(7);
        SimilarityGraph::build(sims, n, preference, &mut rng).expect("valid graph")
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_damp() {
        assert_eq!(damp(0.0, 10.0, 0.9), 10.0 * (1.0 - 0.9));
        assert_eq!(damp(4.0, 8.0, 0.5), 6.0);
    }

    #[test]
    fn test_top_two_tracks_first_max() {
        let mut top = TopTwo::new();
        for (pos, v) in [3.0, 7.0, 7.0, 1.0].into_iter().enumerate() {
            top.offer(pos, v);
        }
        assert_eq!(top.first, 7.0);
        assert_eq!(top.second, 7.0);
        assert_eq!(top.argmax, Some(1));
    }

    #[test]
    fn test_top_two_single_value() {
        let mut top = TopTwo::new();
        top.offer(0, 2.0);
        assert_eq!(top.first, 2.0);
        assert_eq!(top.second, f64::NEG_INFINITY);
    }

    #[test]
    fn test_first_responsibility_round() {
        // point 0 candidates: 1 (s=5), 2 (s=1), self (s=1)
        let mut g = graph(&[5.0, 1.0, 1.0], 3, Preference::Minimum);
        update_responsibilities(&mut g, 0.5);
        let e = g.edges();
        // (0,1) is the argmax, compared against the runner-up 1.0
        assert!(close(e[0].r, 0.5 * (5.0 - 1.0)));
        // (0,2) and (0,0) are compared against the max 5.0
        assert!(close(e[1].r, 0.5 * (1.0 - 5.0)));
        assert!(close(e[3].r, 0.5 * (1.0 - 5.0)));
        // (1,2) s=1 vs self pref 1: whichever wins is compared with the other
        assert!(close(e[2].r, 0.0));
        assert!(close(e[4].r, 0.0));
        // the last point only has its self edge
        assert_eq!(e[5].r, f64::INFINITY);
    }

    #[test]
    fn test_first_availability_round() {
        let mut g = graph(&[5.0, 1.0, 1.0], 3, Preference::Minimum);
        update_responsibilities(&mut g, 0.5);
        update_availabilities(&mut g, 0.5);
        let e = g.edges();
        // candidate 1: contributor (0,1) with r=2, self r(1,1)=0
        assert!(close(e[4].a, 0.5 * 2.0));
        assert!(close(e[0].a, 0.5 * (0.0_f64 + 2.0 - 2.0).min(0.0)));
        // candidate 0 has no contributors
        assert!(close(e[3].a, 0.0));
        // candidate 2: r(2,2)=inf keeps contributor availabilities at 0
        assert_eq!(e[1].a, 0.0);
        assert_eq!(e[2].a, 0.0);
    }

    #[test]
    fn test_availability_caps_non_self_at_zero() {
        let sims: Vec<f64> = (0..10).map(|v| -(v as f64)).collect();
        let mut g = graph(&sims, 5, Preference::Median);
        for _ in 0..20 {
            update_responsibilities(&mut g, 0.9);
            update_availabilities(&mut g, 0.9);
        }
        for edge in g.edges().iter().filter(|e| !e.is_self()) {
            assert!(edge.a <= 0.0, "a({},{}) = {}", edge.src, edge.dst, edge.a);
        }
        for edge in g.edges().iter().filter(|e| e.is_self()) {
            assert!(edge.a >= 0.0);
        }
    }
}
