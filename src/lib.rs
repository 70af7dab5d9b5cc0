//! Exemplar: affinity propagation clustering in pure Rust.
//!
//! Affinity propagation picks cluster representatives ("exemplars") among the
//! data points themselves by passing responsibility and availability messages
//! between pairs of points until every point's choice stops changing.
//!
//! # Quick Start
//!
//! ```
//! use exemplar::prelude::*;
//!
//! let points = vec![
//!     vec![1.0, 2.0],
//!     vec![1.5, 1.8],
//!     vec![1.0, 0.6],
//!     vec![8.0, 8.0],
//!     vec![9.0, 11.0],
//!     vec![8.5, 9.0],
//! ];
//! let similarities = CondensedSimilarity::negative_squared_euclidean(&points).unwrap();
//!
//! let mut ap = AffinityPropagation::new().with_random_state(42);
//! ap.fit(&similarities).unwrap();
//!
//! assert_eq!(ap.exemplars().len(), 6);
//! assert!(ap.n_clusters() >= 1);
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Condensed similarity storage
//! - [`cluster`]: Similarity graph, message passing, exemplar extraction, estimator
//! - [`error`]: Error type and `Result` alias
//! - [`traits`]: Estimator trait
//!
//! # Logging
//!
//! Runs emit `tracing` events (`debug` per run, `trace` per round, `warn` when
//! the iteration budget runs out). Install a subscriber to see them.

pub mod cluster;
pub mod error;
pub mod prelude;
pub mod primitives;
pub mod traits;

pub use error::{ExemplarError, Result};
pub use primitives::CondensedSimilarity;
pub use traits::UnsupervisedEstimator;
