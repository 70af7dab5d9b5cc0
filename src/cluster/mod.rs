//! Clustering algorithms.
//!
//! Affinity Propagation: points exchange responsibility and availability
//! messages over a similarity graph and settle on exemplars, without the
//! number of clusters being fixed in advance.
//!
//! The pieces are usable on their own:
//!
//! - [`SimilarityGraph`]: edge arena built from condensed similarities
//! - [`update_responsibilities`] / [`update_availabilities`]: one damped round
//! - [`update_exemplars`]: argmax of `a + r` per point, with change detection
//! - [`AffinityPropagation`]: the estimator driving them to convergence

mod affinity_propagation;
mod exemplars;
mod graph;
mod messages;

pub use affinity_propagation::{affinity_propagation, AffinityPropagation};
pub use exemplars::{best_exemplar, cluster_centers, compact_labels, update_exemplars};
pub use graph::{perturb, Edge, Preference, SimilarityGraph};
pub use messages::{update_availabilities, update_responsibilities};
