//! posterior_ratio — Occam-penalised Bayesian selection between nested
//! polynomial fits, with optional Python bindings.
//!
//! Purpose
//! -------
//! Decide whether noisy one-dimensional data with known Gaussian noise
//! level `σ` is better described by a straight line (H1) or a parabola (H2)
//! using the posterior ratio
//!
//! ```text
//! PR = P(H1)/P(H2) · exp(−(χ²_H1 − χ²_H2)) · (λ_max − λ_min) / (δλ √(2π))
//! ```
//!
//! and serve as the PyO3 bridge for the `_posterior_ratio` extension module
//! when the `python-bindings` feature is enabled.
//!
//! Key behaviors
//! -------------
//! - `fitting`: validated datasets, SVD least-squares polynomial fits,
//!   chi-square, and coefficient covariance.
//! - `model_selection`: posterior ratio, its factors, and the one-pass
//!   `PosteriorRatioEstimator`.
//! - `simulation`: synthetic datasets and seeded Monte Carlo sweeps.
//! - `logging` (feature `obs_slog`): structured terminal logger.
//! - `#[pyclass]` wrappers registered under `_posterior_ratio.model_selection`.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; this file only performs
//!   FFI glue and error mapping.
//! - Python-visible types mirror the invariants of their Rust counterparts.
//!
//! Conventions
//! -----------
//! - Coefficients are ordered highest power first everywhere.
//! - Errors are rich Rust enums internally and become `ValueError` at the
//!   PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Rust callers depend on the inner modules directly.
//! - The Python package imports `_posterior_ratio.model_selection` and wraps
//!   its classes; plotting layers call `PolynomialFit.evaluate`.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each inner module; the end-to-end pipeline is
//!   covered by `tests/integration_model_selection.rs`.

pub mod fitting;
#[cfg(feature = "obs_slog")]
pub mod logging;
pub mod model_selection;
pub mod simulation;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    fitting::polyfit::{PolynomialFit, fit_polynomial},
    model_selection::estimator::{ModelComparison, PosteriorRatioEstimator},
    utils::{extract_dataset, extract_owned_array, extract_ratio_options},
};

/// PyModelComparison — Python-facing linear vs quadratic comparison.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `ModelComparison(x, y, sigma, lambda_range_width, prior_odds=1.0, scaling="known_sigma")`:
/// - `x`, `y`: array-like of float64, equal length, at least 3 points.
/// - `sigma`: known noise standard deviation, `> 0`.
/// - `lambda_range_width`: prior range width of the quadratic coefficient.
/// - `prior_odds`: `P(H1)/P(H2)`.
/// - `scaling`: `"known_sigma"` or `"residual_variance"`.
///
/// Notes
/// -----
/// - Native Rust code should call [`PosteriorRatioEstimator::compare`].
#[cfg(feature = "python-bindings")]
#[pyclass(name = "ModelComparison", module = "posterior_ratio.model_selection")]
pub struct PyModelComparison {
    inner: ModelComparison,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyModelComparison {
    #[new]
    #[pyo3(
        text_signature = "(x, y, sigma, lambda_range_width, /, prior_odds=1.0, scaling='known_sigma')",
        signature = (x, y, sigma, lambda_range_width, prior_odds = None, scaling = None)
    )]
    pub fn new<'py>(
        py: Python<'py>, x: &Bound<'py, PyAny>, y: &Bound<'py, PyAny>, sigma: f64,
        lambda_range_width: f64, prior_odds: Option<f64>, scaling: Option<&str>,
    ) -> PyResult<PyModelComparison> {
        let dataset = extract_dataset(py, x, y, sigma)?;
        let opts = extract_ratio_options(prior_odds, lambda_range_width, scaling)?;
        let inner = PosteriorRatioEstimator::new(opts).compare(&dataset)?;
        Ok(PyModelComparison { inner })
    }

    /// Posterior ratio P(H1|D)/P(H2|D).
    #[getter]
    pub fn posterior_ratio(&self) -> f64 {
        self.inner.ratio().value()
    }

    #[getter]
    pub fn log_posterior_ratio(&self) -> f64 {
        self.inner.ratio().log_value()
    }

    #[getter]
    pub fn occam_factor(&self) -> f64 {
        self.inner.ratio().occam_factor()
    }

    #[getter]
    pub fn delta_lambda(&self) -> f64 {
        self.inner.ratio().delta_lambda()
    }

    #[getter]
    pub fn chi2_linear(&self) -> f64 {
        self.inner.fit_h1().chi2()
    }

    #[getter]
    pub fn chi2_quadratic(&self) -> f64 {
        self.inner.fit_h2().chi2()
    }

    /// Linear coefficients `[slope, intercept]`.
    #[getter]
    pub fn coefficients_linear(&self) -> Vec<f64> {
        self.inner.fit_h1().coefficients().to_vec()
    }

    /// Quadratic coefficients `[a, b, c]` of `a x² + b x + c`.
    #[getter]
    pub fn coefficients_quadratic(&self) -> Vec<f64> {
        self.inner.fit_h2().coefficients().to_vec()
    }

    #[getter]
    pub fn lrt_statistic(&self) -> f64 {
        self.inner.lrt_statistic()
    }

    #[getter]
    pub fn lrt_pvalue(&self) -> f64 {
        self.inner.lrt_p_value()
    }
}

/// PyPolynomialFit — Python-facing single least-squares polynomial fit.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "PolynomialFit", module = "posterior_ratio.model_selection")]
pub struct PyPolynomialFit {
    inner: PolynomialFit,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyPolynomialFit {
    #[new]
    #[pyo3(text_signature = "(x, y, sigma, degree, /)")]
    pub fn new<'py>(
        py: Python<'py>, x: &Bound<'py, PyAny>, y: &Bound<'py, PyAny>, sigma: f64, degree: usize,
    ) -> PyResult<PyPolynomialFit> {
        let dataset = extract_dataset(py, x, y, sigma)?;
        Ok(PyPolynomialFit { inner: fit_polynomial(&dataset, degree)? })
    }

    #[getter]
    pub fn degree(&self) -> usize {
        self.inner.degree()
    }

    #[getter]
    pub fn coefficients(&self) -> Vec<f64> {
        self.inner.coefficients().to_vec()
    }

    #[getter]
    pub fn residuals(&self) -> Vec<f64> {
        self.inner.residuals().to_vec()
    }

    #[getter]
    pub fn chi2(&self) -> f64 {
        self.inner.chi2()
    }

    /// Coefficient standard errors, `None` for degree 0.
    #[getter]
    pub fn standard_errors(&self) -> Option<Vec<f64>> {
        self.inner.standard_errors().map(|se| se.to_vec())
    }

    /// Evaluate the fitted polynomial on array-like `x` (for plotting).
    pub fn evaluate<'py>(&self, py: Python<'py>, x: &Bound<'py, PyAny>) -> PyResult<Vec<f64>> {
        let xs = extract_owned_array(py, x, "x")?;
        Ok(self.inner.evaluate_many(&xs).to_vec())
    }
}

/// Initialise the `_posterior_ratio` extension module.
///
/// Key behaviors
/// -------------
/// - Create the `model_selection` submodule and attach it to the parent.
/// - Register it in `sys.modules` so dotted imports work from Python.
///
/// Errors
/// ------
/// - `PyErr` if creating the submodule or touching `sys.modules` fails.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _posterior_ratio<'py>(py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let model_selection_mod = PyModule::new(py, "model_selection")?;
    model_selection_mod.add_class::<PyModelComparison>()?;
    model_selection_mod.add_class::<PyPolynomialFit>()?;
    m.add_submodule(&model_selection_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    py.import("sys")?
        .getattr("modules")?
        .set_item("posterior_ratio.model_selection", model_selection_mod)?;
    Ok(())
}
