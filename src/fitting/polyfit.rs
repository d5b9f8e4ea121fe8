//! fitting::polyfit — ordinary least-squares polynomial fits with chi-square.
//!
//! Purpose
//! -------
//! Fit a polynomial of a given degree to a [`Dataset`] by ordinary least
//! squares and package everything a model comparison needs: coefficients,
//! residuals, the chi-square goodness of fit against the known noise level,
//! and (for degree ≥ 1) the coefficient covariance.
//!
//! Key behaviors
//! -------------
//! - [`fit_polynomial`] centres and scales the abscissae onto `[−1, 1]`,
//!   solves the Vandermonde system there by SVD, maps the coefficients back
//!   to raw powers of `x`, and computes `χ² = Σ rᵢ² / σ²`.
//! - [`fit_polynomial_with`] additionally selects the covariance scaling
//!   convention ([`CovarianceScaling`]).
//! - [`PolynomialFit::evaluate`] / [`PolynomialFit::evaluate_many`] give a
//!   read-only view of the fitted curve for plotting layers.
//!
//! Invariants & assumptions
//! ------------------------
//! - A fit requires `n > degree`; otherwise
//!   [`FitError::UnderdeterminedFit`] is returned before any algebra runs.
//! - `chi2 >= 0` and `coefficients.len() == degree + 1`.
//! - Fitting is a pure function of `(dataset, degree, scaling)`.
//!
//! Conventions
//! -----------
//! - Coefficients are ordered highest power first: `[c_d, …, c_1, c_0]`.
//!   Index 0 is therefore the coefficient a degree-`d` model adds over a
//!   degree-`d − 1` model.
//! - Residuals are `yᵢ − p(xᵢ)` in dataset order, evaluated in the scaled
//!   basis so offsets far from zero do not cost precision.
//!
//! Testing notes
//! -------------
//! - Unit tests cover coefficient counts, idempotence, the χ² ordering of
//!   nested fits, the exactly determined boundary, both covariance
//!   scalings, and exact recovery on grids far from zero.

use ndarray::Array1;

use crate::fitting::{
    covariance::{CovarianceScaling, ParamCovariance, estimate_covariance},
    dataset::Dataset,
    design::{ScaledBasis, solve_least_squares, vandermonde},
    errors::{FitError, FitResult},
};

/// PolynomialFit — outcome of a least-squares polynomial fit.
///
/// Fields
/// ------
/// - `degree`: `usize`
///   Polynomial degree `d`.
/// - `coefficients`: `Array1<f64>`
///   Length `d + 1`, highest power first.
/// - `residuals`: `Array1<f64>`
///   `yᵢ − p(xᵢ)` for each observation.
/// - `chi2`: `f64`
///   `Σ rᵢ² / σ²`.
/// - `sigma`: `f64`
///   Noise level of the dataset the fit was computed on.
/// - `covariance`: `Option<ParamCovariance>`
///   Present for `d >= 1`.
///
/// Invariants
/// ----------
/// - `coefficients.len() == degree + 1`, `residuals.len() == n_obs()`.
/// - `chi2` is finite and non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialFit {
    degree: usize,
    coefficients: Array1<f64>,
    residuals: Array1<f64>,
    chi2: f64,
    sigma: f64,
    covariance: Option<ParamCovariance>,
    basis: ScaledBasis,
    scaled_coefficients: Array1<f64>,
}

impl PolynomialFit {
    /// Polynomial degree.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Coefficients, highest power first.
    pub fn coefficients(&self) -> &Array1<f64> {
        &self.coefficients
    }

    /// Residuals `yᵢ − p(xᵢ)`.
    pub fn residuals(&self) -> &Array1<f64> {
        &self.residuals
    }

    /// Chi-square `Σ rᵢ² / σ²`.
    pub fn chi2(&self) -> f64 {
        self.chi2
    }

    /// Chi-square per residual degree of freedom, `None` when `n == k`.
    pub fn reduced_chi2(&self) -> Option<f64> {
        let dof = self.n_obs().checked_sub(self.n_params())?;
        (dof > 0).then(|| self.chi2 / dof as f64)
    }

    /// Noise level of the underlying dataset.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Number of observations used in the fit.
    pub fn n_obs(&self) -> usize {
        self.residuals.len()
    }

    /// Number of free coefficients `k = degree + 1`.
    pub fn n_params(&self) -> usize {
        self.coefficients.len()
    }

    /// Coefficient covariance (degree ≥ 1 only).
    pub fn covariance(&self) -> Option<&ParamCovariance> {
        self.covariance.as_ref()
    }

    /// Per-coefficient standard errors, when a covariance is available.
    pub fn standard_errors(&self) -> Option<Array1<f64>> {
        self.covariance.as_ref().map(ParamCovariance::standard_errors)
    }

    /// Evaluate the fitted polynomial at `x` (Horner's scheme, scaled basis).
    pub fn evaluate(&self, x: f64) -> f64 {
        horner(&self.scaled_coefficients, self.basis.transform(x))
    }

    /// Evaluate the fitted polynomial over a grid.
    pub fn evaluate_many(&self, xs: &Array1<f64>) -> Array1<f64> {
        xs.mapv(|x| self.evaluate(x))
    }
}

/// fit_polynomial — least-squares fit with known-σ covariance.
///
/// Parameters
/// ----------
/// - `dataset`: `&Dataset`
///   Validated observations and noise level.
/// - `degree`: `usize`
///   Polynomial degree `d`; requires `dataset.len() > d`.
///
/// Returns
/// -------
/// `FitResult<PolynomialFit>`
///   Coefficients, residuals, χ², and for `d >= 1` the covariance
///   `σ² (XᵀX)⁻¹`.
///
/// Errors
/// ------
/// - `FitError::UnderdeterminedFit`
///   When `dataset.len() <= degree`.
/// - `FitError::Algebra`
///   When the SVD backend fails.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use posterior_ratio::fitting::{Dataset, fit_polynomial};
/// let data = Dataset::new(array![0.0, 1.0, 2.0, 3.0], array![1.0, 3.0, 5.0, 7.0], 0.1).unwrap();
/// let fit = fit_polynomial(&data, 1).unwrap();
/// assert_eq!(fit.coefficients().len(), 2);
/// assert!((fit.coefficients()[0] - 2.0).abs() < 1e-10);
/// assert!(fit.chi2() < 1e-12);
/// ```
pub fn fit_polynomial(dataset: &Dataset, degree: usize) -> FitResult<PolynomialFit> {
    fit_polynomial_with(dataset, degree, CovarianceScaling::KnownSigma)
}

/// fit_polynomial_with — least-squares fit with an explicit covariance scaling.
///
/// Parameters
/// ----------
/// - `dataset`: `&Dataset`
/// - `degree`: `usize`
/// - `scaling`: [`CovarianceScaling`]
///   `KnownSigma` gives `σ² (XᵀX)⁻¹`; `ResidualVariance` gives
///   `SSR / (n − k) · (XᵀX)⁻¹`.
///
/// Returns
/// -------
/// `FitResult<PolynomialFit>`
///
/// Errors
/// ------
/// - `FitError::UnderdeterminedFit` when `n <= degree`.
/// - `FitError::NoResidualDegreesOfFreedom` when `ResidualVariance` is
///   requested for `degree >= 1` and `n == k`.
/// - `FitError::Algebra` when the SVD backend fails.
pub fn fit_polynomial_with(
    dataset: &Dataset, degree: usize, scaling: CovarianceScaling,
) -> FitResult<PolynomialFit> {
    let n = dataset.len();
    if n <= degree {
        return Err(FitError::UnderdeterminedFit { n, degree });
    }
    let k = degree + 1;

    let basis = ScaledBasis::from_abscissae(dataset.x());
    let t = basis.transform_all(dataset.x());
    let design = vandermonde(&t, degree);
    let solution = solve_least_squares(&design, dataset.y())?;

    let to_raw = basis.to_raw(degree);
    let coefficients = Array1::from_iter((&to_raw * &solution.coefficients).iter().copied());
    if coefficients.iter().any(|c| !c.is_finite()) {
        return Err(FitError::Algebra("non-finite coefficients in the raw basis"));
    }
    let scaled_coefficients = Array1::from_iter(solution.coefficients.iter().copied());

    let fitted = t.mapv(|ti| horner(&scaled_coefficients, ti));
    let residuals = dataset.y() - &fitted;
    let ssr: f64 = residuals.iter().map(|r| r * r).sum();
    let sigma = dataset.sigma();
    let chi2 = ssr / (sigma * sigma);

    let covariance = if degree >= 1 {
        let scale = match scaling {
            CovarianceScaling::KnownSigma => sigma * sigma,
            CovarianceScaling::ResidualVariance => {
                if n <= k {
                    return Err(FitError::NoResidualDegreesOfFreedom { n, k });
                }
                ssr / (n - k) as f64
            }
        };
        Some(estimate_covariance(&solution.pinv_factor, &to_raw, solution.rank, scale, scaling))
    } else {
        None
    };

    Ok(PolynomialFit {
        degree,
        coefficients,
        residuals,
        chi2,
        sigma,
        covariance,
        basis,
        scaled_coefficients,
    })
}

// ---- Helper methods ----

fn horner(coefficients: &Array1<f64>, t: f64) -> f64 {
    coefficients.iter().fold(0.0, |acc, &c| acc * t + c)
}
