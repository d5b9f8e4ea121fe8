//! model_selection::options — configuration for the posterior ratio.
//!
//! Purpose
//! -------
//! Collect the externally supplied modelling choices of a model comparison
//! in one validated value: prior odds `P(H1)/P(H2)`, the prior range width
//! `λ_max − λ_min` of the added coefficient, the covariance scaling used for
//! `δλ`, and whether progress is logged.
//!
//! Invariants & assumptions
//! ------------------------
//! - `prior_odds` and `lambda_range_width` are finite and `> 0`.
//! - Neither value is derived from the data; both are modelling inputs.
//!
//! Conventions
//! -----------
//! - Construct through [`PosteriorRatioOptions::new`] (validating) and refine
//!   with the `with_*` builders; fields are read-only afterwards.
//! - `verbose` only has an effect when the `obs_slog` feature is enabled.

use crate::fitting::covariance::CovarianceScaling;
use crate::model_selection::errors::SelectionResult;
use crate::model_selection::validation::validate_positive;

/// Prior odds used when the caller supplies none.
pub const DEFAULT_PRIOR_ODDS: f64 = 1.0;

/// PosteriorRatioOptions — validated inputs of the Occam-penalised ratio.
///
/// Fields
/// ------
/// - `prior_odds`: `f64`
///   `P(H1) / P(H2)`; defaults to [`DEFAULT_PRIOR_ODDS`].
/// - `lambda_range_width`: `f64`
///   Width of the prior range of the added coefficient.
/// - `scaling`: [`CovarianceScaling`]
///   Convention used to compute `δλ`; defaults to `KnownSigma`.
/// - `verbose`: `bool`
///   Emit structured log records during `compare` (`obs_slog` only).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PosteriorRatioOptions {
    prior_odds: f64,
    lambda_range_width: f64,
    scaling: CovarianceScaling,
    verbose: bool,
}

impl PosteriorRatioOptions {
    /// Construct validated options.
    ///
    /// Parameters
    /// ----------
    /// - `prior_odds`: `Option<f64>`
    ///   `P(H1) / P(H2)`; `None` means `1.0`.
    /// - `lambda_range_width`: `f64`
    ///   `λ_max − λ_min` for the added coefficient.
    ///
    /// Errors
    /// ------
    /// - `SelectionError::InvalidConfiguration` when either value is not
    ///   finite or not strictly positive.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use posterior_ratio::model_selection::PosteriorRatioOptions;
    /// let opts = PosteriorRatioOptions::new(None, 2.0).unwrap();
    /// assert_eq!(opts.prior_odds(), 1.0);
    /// assert!(PosteriorRatioOptions::new(Some(0.0), 2.0).is_err());
    /// ```
    pub fn new(prior_odds: Option<f64>, lambda_range_width: f64) -> SelectionResult<Self> {
        let prior_odds = prior_odds.unwrap_or(DEFAULT_PRIOR_ODDS);
        validate_positive("prior_odds", prior_odds)?;
        validate_positive("lambda_range_width", lambda_range_width)?;
        Ok(PosteriorRatioOptions {
            prior_odds,
            lambda_range_width,
            scaling: CovarianceScaling::default(),
            verbose: false,
        })
    }

    /// Replace the covariance scaling convention.
    pub fn with_scaling(mut self, scaling: CovarianceScaling) -> Self {
        self.scaling = scaling;
        self
    }

    /// Enable or disable structured logging.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn prior_odds(&self) -> f64 {
        self.prior_odds
    }

    pub fn lambda_range_width(&self) -> f64 {
        self.lambda_range_width
    }

    pub fn scaling(&self) -> CovarianceScaling {
        self.scaling
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}
