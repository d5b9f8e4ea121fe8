//! fitting — datasets, least-squares polynomial fits, and their covariance.
//!
//! Purpose
//! -------
//! Provide the numerical building blocks of the model comparison: a
//! validated [`Dataset`] with a known noise level, ordinary least-squares
//! polynomial fits ([`fit_polynomial`]) with chi-square statistics, and the
//! coefficient covariance ([`ParamCovariance`]) from which the Occam factor
//! draws its parameter uncertainty.
//!
//! Key behaviors
//! -------------
//! - Validate inputs once in [`Dataset::new`] (lengths, finiteness, `σ > 0`).
//! - Solve Vandermonde systems by SVD on abscissae centred and scaled onto
//!   `[−1, 1]`, then map coefficients back to raw powers of `x`.
//! - Compute `Cov(β̂) = s² M (TᵀT)⁺ Mᵀ` from the same SVD, where `T` is the
//!   scaled design and `M` the basis map, and report the numerical rank.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every fit requires `n > degree`.
//! - Coefficient vectors are ordered highest power first.
//! - All failures are reported through [`FitError`] / [`FitResult`].
//!
//! Downstream usage
//! ----------------
//! - `model_selection` fits H1 and H2 with [`fit_polynomial_with`] and reads
//!   `χ²` and the covariance diagonal from the resulting [`PolynomialFit`]s.
//! - Plotting layers call [`PolynomialFit::evaluate_many`] on a grid.

pub mod covariance;
pub mod dataset;
pub(crate) mod design;
pub mod errors;
pub mod polyfit;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::covariance::{CovarianceScaling, ParamCovariance};
pub use self::dataset::Dataset;
pub use self::errors::{Axis, FitError, FitResult};
pub use self::polyfit::{PolynomialFit, fit_polynomial, fit_polynomial_with};

pub mod prelude {
    pub use super::covariance::{CovarianceScaling, ParamCovariance};
    pub use super::dataset::Dataset;
    pub use super::errors::{FitError, FitResult};
    pub use super::polyfit::{PolynomialFit, fit_polynomial, fit_polynomial_with};
}
