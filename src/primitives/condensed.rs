//! Condensed (strict upper triangle) similarity storage.

use crate::error::{ExemplarError, Result};
use serde::{Deserialize, Serialize};

/// Number of off-diagonal pairs among `n_points` points, `n * (n - 1) / 2`.
///
/// Returns `None` when the count does not fit in `usize`.
#[must_use]
pub fn condensed_len(n_points: usize) -> Option<usize> {
    if n_points < 2 {
        return Some(0);
    }
    n_points.checked_mul(n_points - 1).map(|pairs| pairs / 2)
}

/// Position of the pair `(i, j)`, `i < j`, in a row-major condensed array.
#[inline]
#[must_use]
pub fn condensed_index(n_points: usize, i: usize, j: usize) -> usize {
    debug_assert!(i < j && j < n_points);
    i * n_points - i * (i + 1) / 2 + (j - i - 1)
}

/// Symmetric pairwise similarities over `n` points, stored as the strict upper
/// triangle in row-major order: `(0,1), (0,2), .., (0,n-1), (1,2), ..`.
///
/// The diagonal is not stored; self-similarity (the preference) is chosen by
/// the clustering algorithm.
///
/// # Examples
///
/// ```
/// use exemplar::primitives::CondensedSimilarity;
///
/// let s = CondensedSimilarity::from_vec(3, vec![5.0, 1.0, 1.0]).expect("3 pairs for 3 points");
/// assert_eq!(s.n_points(), 3);
/// assert_eq!(s.get(0, 1), 5.0);
/// assert_eq!(s.get(2, 1), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CondensedSimilarity {
    n_points: usize,
    data: Vec<f64>,
}

impl CondensedSimilarity {
    /// Wraps a condensed similarity vector.
    ///
    /// # Errors
    ///
    /// Returns [`ExemplarError::InvalidInputSize`] if `n_points` is zero or
    /// `data.len() != n_points * (n_points - 1) / 2`.
    pub fn from_vec(n_points: usize, data: Vec<f64>) -> Result<Self> {
        validate_condensed(n_points, data.len())?;
        Ok(Self { n_points, data })
    }

    /// Builds the condensed array by evaluating `f(i, j)` for every `i < j`.
    ///
    /// # Errors
    ///
    /// Returns an error if `n_points` is zero or the pair count overflows.
    pub fn from_fn<F>(n_points: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> f64,
    {
        let len = validate_condensed(n_points, condensed_len(n_points).unwrap_or(usize::MAX))?;
        let mut data = Vec::with_capacity(len);
        for i in 0..n_points {
            for j in (i + 1)..n_points {
                data.push(f(i, j));
            }
        }
        Ok(Self { n_points, data })
    }

    /// Negative squared Euclidean distance between feature rows.
    ///
    /// # Errors
    ///
    /// Returns an error if `points` is empty or the rows have different lengths.
    pub fn negative_squared_euclidean(points: &[Vec<f64>]) -> Result<Self> {
        let n_features = points.first().map_or(0, Vec::len);
        if let Some(bad) = points.iter().find(|row| row.len() != n_features) {
            return Err(ExemplarError::DimensionMismatch {
                expected: format!("{n_features} features"),
                actual: format!("{} features", bad.len()),
            });
        }
        Self::from_fn(points.len(), |i, j| {
            -points[i]
                .iter()
                .zip(&points[j])
                .map(|(a, b)| (a - b) * (a - b))
                .sum::<f64>()
        })
    }

    /// Returns the number of points.
    #[must_use]
    pub fn n_points(&self) -> usize {
        self.n_points
    }

    /// Returns the number of stored pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true when there are no off-diagonal pairs (a single point).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Similarity between two distinct points, in either order.
    ///
    /// # Panics
    ///
    /// Panics if `i == j` or either index is out of range.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i != j, "diagonal similarities are not stored");
        assert!(
            i < self.n_points && j < self.n_points,
            "index out of range for {} points",
            self.n_points
        );
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        self.data[condensed_index(self.n_points, lo, hi)]
    }

    /// Returns the underlying condensed data.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

/// Checks `len` against the condensed length for `n_points` and returns it.
pub(crate) fn validate_condensed(n_points: usize, len: usize) -> Result<usize> {
    let expected = condensed_len(n_points);
    match expected {
        Some(expected) if n_points > 0 && expected == len => Ok(len),
        _ => Err(ExemplarError::input_size(
            n_points,
            expected.unwrap_or(usize::MAX),
            len,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condensed_len() {
        assert_eq!(condensed_len(0), Some(0));
        assert_eq!(condensed_len(1), Some(0));
        assert_eq!(condensed_len(2), Some(1));
        assert_eq!(condensed_len(5), Some(10));
        assert_eq!(condensed_len(usize::MAX), None);
    }

    #[test]
    fn test_condensed_index_row_major() {
        // n = 4: (0,1)=0 (0,2)=1 (0,3)=2 (1,2)=3 (1,3)=4 (2,3)=5
        let mut expected = 0;
        for i in 0..4 {
            for j in (i + 1)..4 {
                assert_eq!(condensed_index(4, i, j), expected);
                expected += 1;
            }
        }
    }

    #[test]
    fn test_from_vec_rejects_wrong_length() {
        let err = CondensedSimilarity::from_vec(4, vec![0.0; 5]).unwrap_err();
        assert_eq!(err, ExemplarError::input_size(4, 6, 5));
    }

    #[test]
    fn test_from_vec_rejects_zero_points() {
        let err = CondensedSimilarity::from_vec(0, vec![]).unwrap_err();
        assert!(matches!(err, ExemplarError::InvalidInputSize { n_points: 0, .. }));
    }

    #[test]
    fn test_single_point_is_empty() {
        let s = CondensedSimilarity::from_vec(1, vec![]).expect("single point");
        assert!(s.is_empty());
        assert_eq!(s.len(), 0);
    }

    #[test]
    fn test_get_is_symmetric() {
        let s = CondensedSimilarity::from_fn(4, |i, j| (10 * i + j) as f64).expect("valid");
        assert_eq!(s.get(1, 3), 13.0);
        assert_eq!(s.get(3, 1), 13.0);
    }

    #[test]
    #[should_panic(expected = "diagonal")]
    fn test_get_diagonal_panics() {
        let s = CondensedSimilarity::from_vec(2, vec![1.0]).expect("valid");
        let _ = s.get(1, 1);
    }

    #[test]
    fn test_negative_squared_euclidean() {
        let points = vec![vec![0.0, 0.0], vec![3.0, 4.0], vec![0.0, 1.0]];
        let s = CondensedSimilarity::negative_squared_euclidean(&points).expect("valid");
        assert_eq!(s.as_slice(), &[-25.0, -1.0, -18.0]);
    }

    #[test]
    fn test_negative_squared_euclidean_ragged_rows() {
        let points = vec![vec![0.0, 0.0], vec![1.0]];
        let err = CondensedSimilarity::negative_squared_euclidean(&points).unwrap_err();
        assert!(matches!(err, ExemplarError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_negative_squared_euclidean_empty() {
        let err = CondensedSimilarity::negative_squared_euclidean(&[]).unwrap_err();
        assert!(matches!(err, ExemplarError::InvalidInputSize { .. }));
    }
}
