//! utils — Python argument conversion for the PyO3 bindings.
//!
//! Purpose
//! -------
//! Turn loosely typed Python arguments (numpy arrays, pandas Series, plain
//! sequences, strings) into the validated Rust types used by `fitting` and
//! `model_selection`. Only compiled with the `python-bindings` feature.
//!
//! Conventions
//! -----------
//! - Type problems raise `TypeError`; value problems raise `ValueError`
//!   (via the `From<_> for PyErr` impls of the error enums).

#[cfg(feature = "python-bindings")]
use ndarray::Array1;

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    prelude::*,
    types::PyAny,
};

#[cfg(feature = "python-bindings")]
use crate::{
    fitting::{covariance::CovarianceScaling, dataset::Dataset},
    model_selection::options::PosteriorRatioOptions,
};

/// Borrow or copy a 1-D float64 input as a contiguous read-only array.
///
/// Accepts, in order of preference: a contiguous `numpy.ndarray`, anything
/// with `to_numpy()` (pandas Series), or a sequence of floats (copied).
#[cfg(feature = "python-bindings")]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw: &Bound<'py, PyAny>, name: &str,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr) = raw.extract::<PyReadonlyArray1<f64>>() {
        if arr.as_slice().is_ok() {
            return Ok(arr);
        }
    }

    if let Ok(obj) = raw.call_method("to_numpy", (false,), None) {
        if let Ok(series) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series.as_slice().is_ok() {
                return Ok(series);
            }
        }
    }

    let vec: Vec<f64> = raw.extract().map_err(|_| {
        PyTypeError::new_err(format!(
            "{name} must be a 1-D numpy.ndarray, pandas.Series, or sequence of float64"
        ))
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Copy a Python 1-D input into an owned `Array1<f64>`.
#[cfg(feature = "python-bindings")]
pub fn extract_owned_array<'py>(
    py: Python<'py>, raw: &Bound<'py, PyAny>, name: &str,
) -> PyResult<Array1<f64>> {
    let arr = extract_f64_array(py, raw, name)?;
    let slice = arr.as_slice().map_err(|_| {
        PyValueError::new_err(format!("{name} must be a contiguous 1-D float64 array"))
    })?;
    Ok(Array1::from(slice.to_vec()))
}

/// Build a validated [`Dataset`] from Python `x`, `y`, and `sigma`.
#[cfg(feature = "python-bindings")]
pub fn extract_dataset<'py>(
    py: Python<'py>, x: &Bound<'py, PyAny>, y: &Bound<'py, PyAny>, sigma: f64,
) -> PyResult<Dataset> {
    let x = extract_owned_array(py, x, "x")?;
    let y = extract_owned_array(py, y, "y")?;
    Ok(Dataset::new(x, y, sigma)?)
}

/// Build [`PosteriorRatioOptions`] from Python keyword arguments.
#[cfg(feature = "python-bindings")]
pub fn extract_ratio_options(
    prior_odds: Option<f64>, lambda_range_width: f64, scaling: Option<&str>,
) -> PyResult<PosteriorRatioOptions> {
    let scaling = match scaling {
        Some(name) => name.parse::<CovarianceScaling>().map_err(PyValueError::new_err)?,
        None => CovarianceScaling::default(),
    };
    Ok(PosteriorRatioOptions::new(prior_odds, lambda_range_width)?.with_scaling(scaling))
}
