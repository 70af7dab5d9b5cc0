//! Affinity Propagation estimator and its convergence loop.

use super::exemplars::{cluster_centers, compact_labels, update_exemplars};
use super::graph::{Preference, SimilarityGraph};
use super::messages::{update_availabilities, update_responsibilities};
use crate::error::{ExemplarError, Result};
use crate::primitives::CondensedSimilarity;
use crate::traits::UnsupervisedEstimator;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Affinity Propagation clustering.
///
/// Points exchange responsibility and availability messages over a
/// similarity graph until the exemplar each point picks stops changing.
///
/// # Algorithm
///
/// 1. Build the similarity graph, choose the preference and perturb ties
/// 2. Update responsibilities, then availabilities, both damped
/// 3. Pick each point's exemplar as the candidate maximizing `a + r`
/// 4. Stop after `convergence_iter` rounds without a change, or `max_iter` rounds
///
/// # Examples
///
/// ```
/// use exemplar::prelude::*;
///
/// // (0,1)=5, (0,2)=1, (1,2)=1
/// let mut ap = AffinityPropagation::new()
///     .with_preference(Preference::Minimum)
///     .with_damping(0.5)
///     .with_max_iter(100)
///     .with_convergence_iter(10)
///     .with_random_state(42);
///
/// let exemplars = ap.run(&[5.0, 1.0, 1.0], 3).expect("valid input");
/// assert_eq!(exemplars[0], exemplars[1]);
/// assert_eq!(exemplars[2], 2);
/// ```
///
/// # Performance
///
/// - Time complexity: O(n² · i) where n=points, i=iterations
/// - Space complexity: O(n²)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffinityPropagation {
    /// Damping factor in (0, 1).
    damping: f64,
    /// Maximum number of message-passing rounds.
    max_iter: usize,
    /// Unchanged rounds required to stop early.
    convergence_iter: usize,
    /// Self-similarity policy.
    preference: Preference,
    /// Seed for the tie-breaking noise.
    random_state: Option<u64>,
    /// Exemplar index per point after fitting.
    exemplars: Option<Vec<usize>>,
    /// Sorted distinct exemplars.
    cluster_centers: Option<Vec<usize>>,
    /// Cluster id per point.
    labels: Option<Vec<usize>>,
    /// Rounds executed in the last run.
    n_iter: usize,
    /// Whether the last run stopped on the convergence window.
    converged: bool,
}

impl Default for AffinityPropagation {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of the message-passing loop.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Convergence {
    pub(crate) exemplars: Vec<usize>,
    pub(crate) n_iter: usize,
    pub(crate) converged: bool,
}

/// Drives rounds on an already built graph.
///
/// Parameters are assumed validated.
pub(crate) fn iterate(
    graph: &mut SimilarityGraph,
    damping: f64,
    max_iter: usize,
    convergence_iter: usize,
) -> Convergence {
    let n_points = graph.n_points();
    let mut current: Vec<Option<usize>> = vec![None; n_points];
    let mut rounds_since_change = 0;
    let mut iteration = 0;

    while iteration < max_iter && rounds_since_change < convergence_iter {
        update_responsibilities(graph, damping);
        update_availabilities(graph, damping);
        let changed = update_exemplars(graph, &mut current);
        iteration += 1;

        if changed {
            rounds_since_change = 0;
        } else {
            rounds_since_change += 1;
        }
        trace!(iteration, changed, rounds_since_change, "message passing round");
    }

    let exemplars = current
        .iter()
        .enumerate()
        .map(|(i, ex)| ex.unwrap_or(i))
        .collect();

    Convergence {
        exemplars,
        n_iter: iteration,
        converged: rounds_since_change >= convergence_iter,
    }
}

impl AffinityPropagation {
    /// Creates a new Affinity Propagation with default parameters.
    ///
    /// Damping 0.9, 1000 iterations, convergence window 50, median preference.
    #[must_use]
    pub fn new() -> Self {
        Self {
            damping: 0.9,
            max_iter: 1000,
            convergence_iter: 50,
            preference: Preference::Median,
            random_state: None,
            exemplars: None,
            cluster_centers: None,
            labels: None,
            n_iter: 0,
            converged: false,
        }
    }

    /// Sets the damping factor, in (0, 1).
    #[must_use]
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Sets the maximum number of rounds.
    #[must_use]
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Sets how many unchanged rounds end the run.
    #[must_use]
    pub fn with_convergence_iter(mut self, convergence_iter: usize) -> Self {
        self.convergence_iter = convergence_iter;
        self
    }

    /// Sets the preference policy.
    #[must_use]
    pub fn with_preference(mut self, preference: Preference) -> Self {
        self.preference = preference;
        self
    }

    /// Sets the random seed for reproducibility.
    #[must_use]
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    /// Returns the damping factor.
    #[must_use]
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Returns the maximum number of rounds.
    #[must_use]
    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    /// Returns the convergence window.
    #[must_use]
    pub fn convergence_iter(&self) -> usize {
        self.convergence_iter
    }

    /// Returns the preference policy.
    #[must_use]
    pub fn preference(&self) -> Preference {
        self.preference
    }

    /// Returns the random seed, if set.
    #[must_use]
    pub fn random_state(&self) -> Option<u64> {
        self.random_state
    }

    /// Returns true if the model has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.exemplars.is_some()
    }

    /// Returns the exemplar index chosen by each point.
    ///
    /// # Panics
    ///
    /// Panics if the model has not been fitted.
    #[must_use]
    pub fn exemplars(&self) -> &[usize] {
        self.exemplars
            .as_ref()
            .expect("Model not fitted. Call fit() first.")
    }

    /// Returns the sorted distinct exemplar indices.
    ///
    /// # Panics
    ///
    /// Panics if the model has not been fitted.
    #[must_use]
    pub fn cluster_centers_indices(&self) -> &[usize] {
        self.cluster_centers
            .as_ref()
            .expect("Model not fitted. Call fit() first.")
    }

    /// Returns the cluster id of each point, in `0..n_clusters()`.
    ///
    /// # Panics
    ///
    /// Panics if the model has not been fitted.
    #[must_use]
    pub fn labels(&self) -> &[usize] {
        self.labels
            .as_ref()
            .expect("Model not fitted. Call fit() first.")
    }

    /// Returns the number of clusters found, 0 before fitting.
    #[must_use]
    pub fn n_clusters(&self) -> usize {
        self.cluster_centers.as_ref().map_or(0, Vec::len)
    }

    /// Returns the number of rounds run.
    #[must_use]
    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    /// Returns true if the last run stopped on the convergence window.
    #[must_use]
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Checks hyperparameters before any work is done.
    ///
    /// # Errors
    ///
    /// Returns [`ExemplarError::InvalidParameter`] naming the first bad value.
    pub fn validate(&self) -> Result<()> {
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(ExemplarError::invalid_parameter(
                "damping",
                self.damping,
                "in (0, 1)",
            ));
        }
        if self.max_iter == 0 {
            return Err(ExemplarError::invalid_parameter("max_iter", 0, ">0"));
        }
        if self.convergence_iter == 0 {
            return Err(ExemplarError::invalid_parameter(
                "convergence_iter",
                0,
                ">0",
            ));
        }
        if let Preference::Fixed(value) = self.preference {
            if !value.is_finite() {
                return Err(ExemplarError::invalid_parameter(
                    "preference",
                    value,
                    "a finite value",
                ));
            }
        }
        Ok(())
    }

    /// Clusters `n_points` points given their condensed similarities.
    ///
    /// Tie-breaking noise is seeded from `random_state`, or from entropy
    /// when unset.
    ///
    /// # Errors
    ///
    /// Returns an error if parameters are invalid or `similarities` does not
    /// hold `n_points * (n_points - 1) / 2` values.
    pub fn run(&mut self, similarities: &[f64], n_points: usize) -> Result<Vec<usize>> {
        let mut rng = match self.random_state {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.run_with_rng(similarities, n_points, &mut rng)
    }

    /// Like [`run`](Self::run) with a caller-supplied noise source.
    ///
    /// # Errors
    ///
    /// Same as [`run`](Self::run).
    pub fn run_with_rng<R: Rng + ?Sized>(
        &mut self,
        similarities: &[f64],
        n_points: usize,
        rng: &mut R,
    ) -> Result<Vec<usize>> {
        self.validate()?;
        let mut graph = SimilarityGraph::build(similarities, n_points, self.preference, rng)?;
        debug!(
            n_points,
            n_edges = graph.n_edges(),
            preference = graph.preference(),
            damping = self.damping,
            "similarity graph built"
        );

        let outcome = iterate(
            &mut graph,
            self.damping,
            self.max_iter,
            self.convergence_iter,
        );

        let centers = cluster_centers(&outcome.exemplars);
        if outcome.converged {
            debug!(
                n_iter = outcome.n_iter,
                n_clusters = centers.len(),
                "affinity propagation converged"
            );
        } else {
            warn!(
                max_iter = self.max_iter,
                n_clusters = centers.len(),
                "affinity propagation did not converge"
            );
        }

        self.labels = Some(compact_labels(&outcome.exemplars, &centers));
        self.cluster_centers = Some(centers);
        self.exemplars = Some(outcome.exemplars.clone());
        self.n_iter = outcome.n_iter;
        self.converged = outcome.converged;
        Ok(outcome.exemplars)
    }
}

impl UnsupervisedEstimator for AffinityPropagation {
    type Labels = Vec<usize>;

    fn fit(&mut self, x: &CondensedSimilarity) -> Result<()> {
        self.run(x.as_slice(), x.n_points()).map(|_| ())
    }

    /// Returns the fitted labels; affinity propagation does not extend to
    /// unseen points, so `x` must be the similarities the model was fitted on.
    ///
    /// # Panics
    ///
    /// Panics if the model has not been fitted, or if `x` covers a different
    /// number of points than the fitted model.
    fn predict(&self, x: &CondensedSimilarity) -> Vec<usize> {
        let labels = self.labels();
        assert_eq!(
            x.n_points(),
            labels.len(),
            "predict expects the {} points the model was fitted on",
            labels.len()
        );
        labels.to_vec()
    }
}

/// Runs affinity propagation with integer preference codes.
///
/// `preference_mode` is 1 (median), 2 (minimum) or 3 (extrapolated minimum).
/// Returns the exemplar index of every point. Noise is seeded from entropy.
///
/// # Errors
///
/// Returns an error for an unknown mode, invalid parameters, or a
/// similarity array whose length does not match `n_points`.
///
/// # Examples
///
/// ```
/// use exemplar::cluster::affinity_propagation;
///
/// let exemplars = affinity_propagation(&[], 1, 1, 0.9, 1000, 50).expect("single point");
/// assert_eq!(exemplars, vec![0]);
/// ```
pub fn affinity_propagation(
    similarities: &[f64],
    n_points: usize,
    preference_mode: i32,
    damping: f64,
    max_iter: usize,
    convergence_iter: usize,
) -> Result<Vec<usize>> {
    AffinityPropagation::new()
        .with_preference(Preference::from_mode(preference_mode)?)
        .with_damping(damping)
        .with_max_iter(max_iter)
        .with_convergence_iter(convergence_iter)
        .run(similarities, n_points)
}

#[cfg(test)]
#[path = "affinity_propagation_tests.rs"]
mod affinity_propagation_tests;

#[cfg(test)]
#[path = "tests_affinity_propagation_contract.rs"]
mod tests_affinity_propagation_contract;
