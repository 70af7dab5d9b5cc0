//! Similarity graph for affinity propagation.
//!
//! Edges live in a flat arena; each point keeps two index lists into it, one
//! for the responsibilities it sends and one for the availabilities it
//! computes as a candidate exemplar.

use crate::error::{ExemplarError, Result};
use crate::primitives::validate_condensed;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Relative scale of the tie-breaking noise added to each similarity.
const TIE_BREAK_RELATIVE: f64 = 1e-16;
/// Absolute floor of the tie-breaking noise, keeps zero similarities moving.
const TIE_BREAK_ABSOLUTE: f64 = 1e-300;

/// How the self-similarity (preference) of every point is chosen.
///
/// Lower preferences produce fewer clusters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Preference {
    /// Median of the off-diagonal similarities (mode 1).
    #[default]
    Median,
    /// Minimum off-diagonal similarity (mode 2).
    Minimum,
    /// `2 * min - max`, below the minimum (mode 3).
    ExtrapolatedMinimum,
    /// Caller-chosen value used as-is.
    Fixed(f64),
}

impl Preference {
    /// Maps the integer mode codes 1, 2, 3 to a preference policy.
    ///
    /// # Errors
    ///
    /// Returns [`ExemplarError::InvalidParameter`] for any other code.
    pub fn from_mode(mode: i32) -> Result<Self> {
        match mode {
            1 => Ok(Self::Median),
            2 => Ok(Self::Minimum),
            3 => Ok(Self::ExtrapolatedMinimum),
            other => Err(ExemplarError::invalid_parameter(
                "preference_mode",
                other,
                "1 (median), 2 (minimum) or 3 (extrapolated minimum)",
            )),
        }
    }

    /// Computes the scalar preference from the off-diagonal similarities.
    ///
    /// Data-driven policies resolve to 0.0 when there are no pairs.
    #[must_use]
    pub fn resolve(&self, similarities: &[f64]) -> f64 {
        if let Self::Fixed(value) = *self {
            return value;
        }
        if similarities.is_empty() {
            return 0.0;
        }
        match self {
            Self::Median => median(similarities),
            Self::Minimum => min_of(similarities),
            Self::ExtrapolatedMinimum => 2.0 * min_of(similarities) - max_of(similarities),
            Self::Fixed(value) => *value,
        }
    }
}

impl TryFrom<i32> for Preference {
    type Error = ExemplarError;

    fn try_from(mode: i32) -> Result<Self> {
        Self::from_mode(mode)
    }
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let m = sorted.len();
    if m % 2 == 1 {
        sorted[m / 2]
    } else {
        (sorted[m / 2 - 1] + sorted[m / 2]) / 2.0
    }
}

fn min_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Adds tie-breaking noise to a similarity, `u` drawn from `[0, 1)`.
#[inline]
#[must_use]
pub fn perturb(s: f64, u: f64) -> f64 {
    s + (TIE_BREAK_RELATIVE * s + TIE_BREAK_ABSOLUTE) * u
}

/// A directed (source, candidate exemplar) pair and its messages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Point sending responsibility.
    pub src: usize,
    /// Candidate exemplar.
    pub dst: usize,
    /// Similarity s(src, dst), or the preference on a self edge.
    pub s: f64,
    /// Responsibility r(src, dst).
    pub r: f64,
    /// Availability a(src, dst).
    pub a: f64,
}

impl Edge {
    fn new(src: usize, dst: usize, s: f64) -> Self {
        Self {
            src,
            dst,
            s,
            r: 0.0,
            a: 0.0,
        }
    }

    /// Returns true for the `(i, i)` preference edge.
    #[must_use]
    pub fn is_self(&self) -> bool {
        self.src == self.dst
    }
}

/// Edge arena plus per-point outgoing/incoming index lists.
///
/// Off-diagonal edges are created once per pair `i < j` and registered only
/// as `outgoing[i]` and `incoming[j]`; the `n` self edges follow them, so the
/// self edge is always last in each point's `incoming` list.
#[derive(Debug, Clone)]
pub struct SimilarityGraph {
    n_points: usize,
    preference: f64,
    pub(crate) edges: Vec<Edge>,
    pub(crate) outgoing: Vec<Vec<usize>>,
    pub(crate) incoming: Vec<Vec<usize>>,
}

impl SimilarityGraph {
    /// Builds the graph from a condensed similarity array.
    ///
    /// Every similarity, including the self edges, is perturbed once with
    /// noise drawn from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`ExemplarError::InvalidInputSize`] if `similarities` is not
    /// `n_points * (n_points - 1) / 2` long or `n_points` is zero.
    pub fn build<R: Rng + ?Sized>(
        similarities: &[f64],
        n_points: usize,
        preference: Preference,
        rng: &mut R,
    ) -> Result<Self> {
        validate_condensed(n_points, similarities.len())?;

        let preference = preference.resolve(similarities);
        let mut edges = Vec::with_capacity(similarities.len() + n_points);
        let mut pairs = similarities.iter();
        for i in 0..n_points {
            for j in (i + 1)..n_points {
                if let Some(&s) = pairs.next() {
                    edges.push(Edge::new(i, j, s));
                }
            }
        }
        edges.extend((0..n_points).map(|i| Edge::new(i, i, preference)));

        let mut outgoing = vec![Vec::new(); n_points];
        let mut incoming = vec![Vec::new(); n_points];
        for (idx, edge) in edges.iter_mut().enumerate() {
            edge.s = perturb(edge.s, rng.gen::<f64>());
            outgoing[edge.src].push(idx);
            incoming[edge.dst].push(idx);
        }

        Ok(Self {
            n_points,
            preference,
            edges,
            outgoing,
            incoming,
        })
    }

    /// Returns the number of points.
    #[must_use]
    pub fn n_points(&self) -> usize {
        self.n_points
    }

    /// Returns the number of edges, off-diagonal plus self.
    #[must_use]
    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    /// Preference before perturbation.
    #[must_use]
    pub fn preference(&self) -> f64 {
        self.preference
    }

    /// All edges in construction order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Edge indices point `i` sends responsibilities along.
    #[must_use]
    pub fn outgoing(&self, i: usize) -> &[usize] {
        &self.outgoing[i]
    }

    /// Edge indices candidate `k` computes availabilities for; self edge last.
    #[must_use]
    pub fn incoming(&self, k: usize) -> &[usize] {
        &self.incoming[k]
    }
}
