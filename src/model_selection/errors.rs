//! model_selection::errors — error types for posterior-ratio computation.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias used by option validation, the
//! posterior-ratio formula, and the estimator pipeline. Fitting failures are
//! wrapped rather than flattened so callers can still match on the
//! underlying [`FitError`].
//!
//! Key behaviors
//! -------------
//! - Define [`SelectionError`] and [`SelectionResult`].
//! - `From<FitError>` lets the estimator use `?` on fitting calls.
//! - `From<SelectionError> for PyErr` maps to `ValueError` when the
//!   `python-bindings` feature is enabled.
//!
//! Conventions
//! -----------
//! - `DegenerateCovariance` is reserved for numerical degeneracy of the
//!   richer model's coefficient uncertainty; configuration problems use
//!   `InvalidConfiguration`.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use crate::fitting::errors::FitError;

/// Result alias for model-selection operations.
pub type SelectionResult<T> = Result<T, SelectionError>;

/// SelectionError — failures while comparing two polynomial models.
///
/// Variants
/// --------
/// - `InvalidConfiguration { param, value, reason }`
///   Prior odds, prior range width, or decision factor out of range.
/// - `DegenerateCovariance { variance, rank, n_params }`
///   The added coefficient's variance is zero, negative, or non-finite, or
///   the normal matrix is rank deficient.
/// - `MissingCovariance { degree }`
///   The richer fit carries no covariance (degree 0).
/// - `DegreeMismatch { simpler, richer }`
///   The models are not nested with exactly one extra coefficient.
/// - `DatasetMismatch { reason }`
///   The fits were computed on different datasets.
/// - `NonFiniteRatio { log_value }`
///   `exp(ln PR)` overflowed.
/// - `Distribution { reason }`
///   The reference χ² distribution could not be constructed.
/// - `Fit(FitError)`
///   A fitting failure surfaced by the estimator.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionError {
    // ---- Configuration ----
    /// Configuration value must be finite and strictly positive.
    InvalidConfiguration { param: &'static str, value: f64, reason: &'static str },

    // ---- Model pair ----
    /// Covariance of the added coefficient is unusable.
    DegenerateCovariance { variance: f64, rank: usize, n_params: usize },

    /// Richer model has no covariance.
    MissingCovariance { degree: usize },

    /// Models must differ by exactly one degree.
    DegreeMismatch { simpler: usize, richer: usize },

    /// Fits must share observations and noise level.
    DatasetMismatch { reason: &'static str },

    // ---- Evaluation ----
    /// Posterior ratio overflowed.
    NonFiniteRatio { log_value: f64 },

    /// Reference distribution construction failed.
    Distribution { reason: String },

    // ---- Wrapped ----
    Fit(FitError),
}

impl std::error::Error for SelectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SelectionError::Fit(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FitError> for SelectionError {
    fn from(err: FitError) -> Self {
        SelectionError::Fit(err)
    }
}

impl std::fmt::Display for SelectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Configuration ----
            SelectionError::InvalidConfiguration { param, value, reason } => {
                write!(f, "Invalid configuration: {param} = {value} ({reason}).")
            }

            // ---- Model pair ----
            SelectionError::DegenerateCovariance { variance, rank, n_params } => write!(
                f,
                "Degenerate covariance: variance of the added coefficient is {variance} \
                 (normal matrix rank {rank} of {n_params})."
            ),
            SelectionError::MissingCovariance { degree } => {
                write!(f, "Degree-{degree} fit carries no coefficient covariance.")
            }
            SelectionError::DegreeMismatch { simpler, richer } => write!(
                f,
                "Models must be nested with one extra coefficient; got degrees {simpler} and {richer}."
            ),
            SelectionError::DatasetMismatch { reason } => {
                write!(f, "Fits were computed on different datasets: {reason}.")
            }

            // ---- Evaluation ----
            SelectionError::NonFiniteRatio { log_value } => {
                write!(f, "Posterior ratio is not representable (ln PR = {log_value}).")
            }
            SelectionError::Distribution { reason } => {
                write!(f, "Reference distribution error: {reason}")
            }

            // ---- Wrapped ----
            SelectionError::Fit(err) => write!(f, "{err}"),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<SelectionError> for PyErr {
    fn from(err: SelectionError) -> PyErr {
        PyValueError::new_err(format!("SelectionError: {err}"))
    }
}
