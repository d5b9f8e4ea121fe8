//! simulation::errors — error types for synthetic data and Monte Carlo sweeps.
//!
//! Purpose
//! -------
//! Report invalid simulation inputs (grids, noise levels, truth polynomials,
//! replication counts) and wrap fitting / model-selection failures raised
//! while a simulated dataset is processed.
//!
//! Conventions
//! -----------
//! - Inner errors are wrapped, not flattened; `source()` exposes them.
//! - `From<SimError> for PyErr` maps to `ValueError` when the
//!   `python-bindings` feature is enabled.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use crate::fitting::errors::FitError;
use crate::model_selection::errors::SelectionError;

/// Result alias for simulation operations.
pub type SimResult<T> = Result<T, SimError>;

/// SimError — failures while generating or analysing synthetic data.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    // ---- Inputs ----
    /// Grid bounds must be finite with `start < stop` and `n >= 2`.
    InvalidGrid { start: f64, stop: f64, n: usize },

    /// Noise standard deviation rejected by the sampler.
    InvalidNoise { sigma: f64, reason: String },

    /// Truth polynomial has no coefficients.
    EmptyTruth,

    /// At least one replication is required.
    InvalidReplications { replications: usize },

    // ---- Wrapped ----
    Fit(FitError),
    Selection(SelectionError),
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Fit(err) => Some(err),
            SimError::Selection(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FitError> for SimError {
    fn from(err: FitError) -> Self {
        SimError::Fit(err)
    }
}

impl From<SelectionError> for SimError {
    fn from(err: SelectionError) -> Self {
        SimError::Selection(err)
    }
}

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Inputs ----
            SimError::InvalidGrid { start, stop, n } => write!(
                f,
                "Invalid grid [{start}, {stop}] with {n} points: bounds must be finite, \
                 start < stop, and n >= 2."
            ),
            SimError::InvalidNoise { sigma, reason } => {
                write!(f, "Invalid noise level sigma = {sigma}: {reason}")
            }
            SimError::EmptyTruth => write!(f, "Truth polynomial must have at least one coefficient."),
            SimError::InvalidReplications { replications } => {
                write!(f, "Sweep needs at least one replication; got {replications}.")
            }

            // ---- Wrapped ----
            SimError::Fit(err) => write!(f, "{err}"),
            SimError::Selection(err) => write!(f, "{err}"),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<SimError> for PyErr {
    fn from(err: SimError) -> PyErr {
        PyValueError::new_err(format!("SimError: {err}"))
    }
}
