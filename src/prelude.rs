//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use exemplar::prelude::*;
//! ```

pub use crate::cluster::{AffinityPropagation, Preference};
pub use crate::error::{ExemplarError, Result};
pub use crate::primitives::CondensedSimilarity;
pub use crate::traits::UnsupervisedEstimator;
