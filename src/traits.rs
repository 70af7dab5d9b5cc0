//! Core traits for clustering estimators.
//!
//! These traits define the API contracts for all clustering algorithms.

use crate::error::Result;
use crate::primitives::CondensedSimilarity;

/// Trait for unsupervised models fitted on pairwise similarities.
///
/// # Examples
///
/// ```
/// use exemplar::prelude::*;
///
/// let points = vec![
///     vec![0.0, 0.0], vec![0.1, 0.1], vec![0.2, 0.0],
///     vec![10.0, 10.0], vec![10.1, 10.1], vec![10.2, 10.0],
/// ];
/// let s = CondensedSimilarity::negative_squared_euclidean(&points).expect("equal-length rows");
///
/// let mut ap = AffinityPropagation::new().with_random_state(42);
/// ap.fit(&s).expect("valid similarities");
/// let labels = ap.predict(&s);
/// assert_eq!(labels.len(), 6);
/// ```
pub trait UnsupervisedEstimator {
    /// The type of labels/clusters produced.
    type Labels;

    /// Fits the model to a similarity matrix.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails (invalid sizes, invalid parameters, etc.).
    fn fit(&mut self, x: &CondensedSimilarity) -> Result<()>;

    /// Predicts cluster assignments.
    fn predict(&self, x: &CondensedSimilarity) -> Self::Labels;
}
