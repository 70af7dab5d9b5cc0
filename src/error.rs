//! Error types for exemplar operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for exemplar operations.
///
/// Every failure is detected before message passing starts; a run that gets
/// past validation always returns an exemplar assignment.
///
/// # Examples
///
/// ```
/// use exemplar::error::ExemplarError;
///
/// let err = ExemplarError::InvalidInputSize {
///     n_points: 4,
///     expected: 6,
///     actual: 5,
/// };
/// assert!(err.to_string().contains("require 6"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ExemplarError {
    /// Condensed similarity length does not match the point count.
    InvalidInputSize {
        /// Number of points requested
        n_points: usize,
        /// Required condensed length, `n * (n - 1) / 2`
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },

    /// Invalid hyperparameter value provided.
    InvalidParameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Row/point dimensions don't agree.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },
}

impl fmt::Display for ExemplarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExemplarError::InvalidInputSize {
                n_points,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Invalid input size: {n_points} points require {expected} condensed similarities, got {actual}"
                )
            }
            ExemplarError::InvalidParameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid parameter: {param} = {value}, expected {constraint}"
                )
            }
            ExemplarError::DimensionMismatch { expected, actual } => {
                write!(f, "Dimension mismatch: expected {expected}, got {actual}")
            }
        }
    }
}

impl std::error::Error for ExemplarError {}

impl ExemplarError {
    /// Create an invalid parameter error from any displayable value.
    #[must_use]
    pub fn invalid_parameter(param: &str, value: impl fmt::Display, constraint: &str) -> Self {
        Self::InvalidParameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }

    /// Create an input size error for a condensed similarity array.
    #[must_use]
    pub fn input_size(n_points: usize, expected: usize, actual: usize) -> Self {
        Self::InvalidInputSize {
            n_points,
            expected,
            actual,
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, ExemplarError>;
