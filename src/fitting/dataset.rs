//! fitting::dataset — validated observations with a known noise level.
//!
//! Purpose
//! -------
//! Hold the `(x_i, y_i)` samples and the known Gaussian noise standard
//! deviation `σ` that every polynomial fit and chi-square statistic in this
//! crate is computed against. Validation happens once, at construction, so
//! downstream code can assume clean inputs.
//!
//! Invariants & assumptions
//! ------------------------
//! - `x.len() == y.len() >= 1`.
//! - Every entry of `x` and `y` is finite.
//! - `σ` is finite and strictly positive; it is a modelling assumption
//!   shared by all observations, not something estimated from the data.
//!
//! Conventions
//! -----------
//! - Fields are private; the dataset is immutable after construction.
//! - Sample order is preserved and carried through to residuals.

use ndarray::Array1;

use crate::fitting::errors::{Axis, FitError, FitResult};

/// Dataset — paired observations plus the known noise level.
///
/// Fields
/// ------
/// - `x`: `Array1<f64>`
///   Independent-variable samples.
/// - `y`: `Array1<f64>`
///   Observed dependent values, one per `x`.
/// - `sigma`: `f64`
///   Known noise standard deviation applied to every observation.
///
/// Invariants
/// ----------
/// - See the module docs; enforced by [`Dataset::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    x: Array1<f64>,
    y: Array1<f64>,
    sigma: f64,
}

impl Dataset {
    /// Construct a validated [`Dataset`].
    ///
    /// Parameters
    /// ----------
    /// - `x`: `Array1<f64>`
    ///   Independent-variable samples; finite.
    /// - `y`: `Array1<f64>`
    ///   Observations; finite and the same length as `x`.
    /// - `sigma`: `f64`
    ///   Known noise standard deviation; finite and `> 0`.
    ///
    /// Returns
    /// -------
    /// `FitResult<Dataset>`
    ///
    /// Errors
    /// ------
    /// - `FitError::EmptyDataset` when `x` is empty.
    /// - `FitError::LengthMismatch` when `x.len() != y.len()`.
    /// - `FitError::NonFiniteData` for the first NaN/±∞ found (x before y).
    /// - `FitError::InvalidConfiguration` when `sigma` is not finite or `<= 0`.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use ndarray::array;
    /// # use posterior_ratio::fitting::Dataset;
    /// let data = Dataset::new(array![0.0, 1.0, 2.0], array![1.0, 3.0, 5.0], 0.5).unwrap();
    /// assert_eq!(data.len(), 3);
    /// assert!(Dataset::new(array![0.0], array![1.0], 0.0).is_err());
    /// ```
    pub fn new(x: Array1<f64>, y: Array1<f64>, sigma: f64) -> FitResult<Self> {
        if x.len() != y.len() {
            return Err(FitError::LengthMismatch { x_len: x.len(), y_len: y.len() });
        }
        if x.is_empty() {
            return Err(FitError::EmptyDataset);
        }
        validate_finite(&x, Axis::X)?;
        validate_finite(&y, Axis::Y)?;
        validate_sigma(sigma)?;

        Ok(Dataset { x, y, sigma })
    }

    /// Independent-variable samples.
    pub fn x(&self) -> &Array1<f64> {
        &self.x
    }

    /// Observed dependent values.
    pub fn y(&self) -> &Array1<f64> {
        &self.y
    }

    /// Known noise standard deviation.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// `true` when there are no observations; never the case after
    /// [`Dataset::new`], which rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

// ---- Helper methods ----

fn validate_finite(values: &Array1<f64>, axis: Axis) -> FitResult<()> {
    match values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        Some((index, &value)) => Err(FitError::NonFiniteData { axis, index, value }),
        None => Ok(()),
    }
}

/// Reject a noise level that is non-finite or not strictly positive.
pub(crate) fn validate_sigma(sigma: f64) -> FitResult<()> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(FitError::InvalidConfiguration {
            param: "sigma",
            value: sigma,
            reason: "must be finite and > 0",
        });
    }
    Ok(())
}
