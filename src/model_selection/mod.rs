//! model_selection — Occam-penalised Bayesian comparison of nested fits.
//!
//! Purpose
//! -------
//! Decide whether a quadratic term is warranted by comparing a linear fit
//! (H1) with a quadratic fit (H2) through the posterior ratio
//!
//! ```text
//! PR = P(H1)/P(H2) · exp(−(χ²_H1 − χ²_H2)) · (λ_max − λ_min) / (δλ √(2π))
//! ```
//!
//! The exponential rewards the better fit of H2; the Occam factor penalises
//! the prior volume its extra coefficient occupies.
//!
//! Key behaviors
//! -------------
//! - [`PosteriorRatioOptions`] validates prior odds and prior range width.
//! - [`compute_posterior_ratio`] combines two existing fits.
//! - [`PosteriorRatioEstimator::compare`] runs the whole pipeline and adds
//!   the likelihood-ratio test as a frequentist companion.
//!
//! Invariants & assumptions
//! ------------------------
//! - Models are nested and differ by exactly one coefficient.
//! - `δλ` comes from the richer fit's covariance at index 0 (highest
//!   power first).
//!
//! Conventions
//! -----------
//! - `PR ≫ 1` favours H1, `PR ≪ 1` favours H2.
//! - All failures are reported through [`SelectionError`] /
//!   [`SelectionResult`]; fitting errors are wrapped in
//!   `SelectionError::Fit`.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each file; the end-to-end pipeline with
//!   simulated data is covered by `tests/integration_model_selection.rs`.

pub mod errors;
pub mod estimator;
pub mod options;
pub mod posterior_ratio;
pub mod validation;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::errors::{SelectionError, SelectionResult};
pub use self::estimator::{ModelComparison, PosteriorRatioEstimator};
pub use self::options::{DEFAULT_PRIOR_ODDS, PosteriorRatioOptions};
pub use self::posterior_ratio::{
    EXTRA_PARAM_INDEX, PosteriorRatio, Preference, compute_posterior_ratio,
};

pub mod prelude {
    pub use super::errors::{SelectionError, SelectionResult};
    pub use super::estimator::{ModelComparison, PosteriorRatioEstimator};
    pub use super::options::PosteriorRatioOptions;
    pub use super::posterior_ratio::{PosteriorRatio, Preference, compute_posterior_ratio};
}
