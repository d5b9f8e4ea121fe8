//! model_selection::estimator — one-pass linear vs quadratic comparison.
//!
//! Purpose
//! -------
//! Package the full comparison pipeline behind a single entry point:
//! fit the simpler (degree 1) and richer (degree 2) polynomials to one
//! [`Dataset`], combine them into a [`PosteriorRatio`], and attach the
//! frequentist likelihood-ratio companion statistic.
//!
//! Key behaviors
//! -------------
//! - [`PosteriorRatioEstimator::compare`] runs fit H1 → fit H2 → ratio and
//!   returns a [`ModelComparison`] owning both fits.
//! - The likelihood-ratio statistic is `Δχ² = χ²_H1 − χ²_H2` clamped at 0
//!   with a χ²(1) survival p-value (`statrs`).
//! - With the `obs_slog` feature and `verbose` set, the chi-square values,
//!   `δλ`, and the ratio are emitted as one structured log record. The
//!   logger is built once in [`PosteriorRatioEstimator::new`] and shared by
//!   every `compare` call (and every clone of the estimator).
//!
//! Invariants & assumptions
//! ------------------------
//! - Both fits use the covariance scaling configured in the options.
//! - Errors propagate immediately; no partial comparison is returned.
//!
//! Downstream usage
//! ----------------
//! - `simulation::posterior_ratio_sweep` calls `compare` once per
//!   replication.
//! - The Python `ModelComparison` class wraps this type.

use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::fitting::{
    dataset::Dataset,
    polyfit::{PolynomialFit, fit_polynomial_with},
};
use crate::model_selection::{
    errors::{SelectionError, SelectionResult},
    options::PosteriorRatioOptions,
    posterior_ratio::{PosteriorRatio, compute_posterior_ratio},
};

/// Degree of the simpler hypothesis H1.
pub const SIMPLER_DEGREE: usize = 1;
/// Degree of the richer hypothesis H2.
pub const RICHER_DEGREE: usize = 2;

/// ModelComparison — both fits, their posterior ratio, and the LRT.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelComparison {
    fit_h1: PolynomialFit,
    fit_h2: PolynomialFit,
    ratio: PosteriorRatio,
    lrt_statistic: f64,
    lrt_p_value: f64,
}

impl ModelComparison {
    /// Linear fit (H1).
    pub fn fit_h1(&self) -> &PolynomialFit {
        &self.fit_h1
    }

    /// Quadratic fit (H2).
    pub fn fit_h2(&self) -> &PolynomialFit {
        &self.fit_h2
    }

    pub fn ratio(&self) -> &PosteriorRatio {
        &self.ratio
    }

    /// Likelihood-ratio statistic `max(χ²_H1 − χ²_H2, 0)`.
    pub fn lrt_statistic(&self) -> f64 {
        self.lrt_statistic
    }

    /// χ²(1) survival probability of [`lrt_statistic`](Self::lrt_statistic).
    pub fn lrt_p_value(&self) -> f64 {
        self.lrt_p_value
    }
}

/// PosteriorRatioEstimator — compares degree 1 and degree 2 fits.
#[derive(Debug, Clone)]
pub struct PosteriorRatioEstimator {
    opts: PosteriorRatioOptions,
    #[cfg(feature = "obs_slog")]
    logger: Option<slog::Logger>,
}

impl PosteriorRatioEstimator {
    /// Build an estimator; with `obs_slog` and `verbose` set this also
    /// creates the terminal logger used by every later `compare`.
    pub fn new(opts: PosteriorRatioOptions) -> Self {
        PosteriorRatioEstimator {
            opts,
            #[cfg(feature = "obs_slog")]
            logger: opts.verbose().then(crate::logging::term_logger),
        }
    }

    pub fn options(&self) -> &PosteriorRatioOptions {
        &self.opts
    }

    /// Replace the comparison logger, e.g. to route records into an
    /// application's own drain. Logging still requires `verbose`.
    #[cfg(feature = "obs_slog")]
    pub fn with_logger(mut self, logger: slog::Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Logger receiving comparison records, if any.
    #[cfg(feature = "obs_slog")]
    pub fn logger(&self) -> Option<&slog::Logger> {
        self.logger.as_ref()
    }

    /// Fit both hypotheses to `dataset` and compare them.
    ///
    /// Parameters
    /// ----------
    /// - `dataset`: `&Dataset`
    ///   Observations with known noise level; needs `n >= 3`.
    ///
    /// Returns
    /// -------
    /// `SelectionResult<ModelComparison>`
    ///
    /// Errors
    /// ------
    /// - `SelectionError::Fit(..)` when either fit fails (for example
    ///   `UnderdeterminedFit` with fewer than 3 points).
    /// - Any error of [`compute_posterior_ratio`].
    /// - `SelectionError::Distribution` if the χ²(1) reference cannot be
    ///   built.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use ndarray::Array1;
    /// # use posterior_ratio::fitting::Dataset;
    /// # use posterior_ratio::model_selection::{PosteriorRatioEstimator, PosteriorRatioOptions};
    /// let x = Array1::linspace(-5.0, 5.0, 11);
    /// let y = x.mapv(|v| 1.0 + 2.0 * v);
    /// let data = Dataset::new(x, y, 0.5).unwrap();
    /// let estimator = PosteriorRatioEstimator::new(PosteriorRatioOptions::new(None, 1.0).unwrap());
    /// let cmp = estimator.compare(&data).unwrap();
    /// assert!(cmp.ratio().value() > 1.0);
    /// ```
    pub fn compare(&self, dataset: &Dataset) -> SelectionResult<ModelComparison> {
        let scaling = self.opts.scaling();
        let fit_h1 = fit_polynomial_with(dataset, SIMPLER_DEGREE, scaling)?;
        let fit_h2 = fit_polynomial_with(dataset, RICHER_DEGREE, scaling)?;
        let ratio = compute_posterior_ratio(&fit_h1, &fit_h2, &self.opts)?;

        let lrt_statistic = ratio.delta_chi2().max(0.0);
        let lrt_p_value = chi_square_sf(lrt_statistic)?;

        #[cfg(feature = "obs_slog")]
        if self.opts.verbose() {
            if let Some(logger) = &self.logger {
                log_comparison(logger, &fit_h1, &fit_h2, &ratio);
            }
        }

        Ok(ModelComparison { fit_h1, fit_h2, ratio, lrt_statistic, lrt_p_value })
    }
}

// ---- Helper methods ----

fn chi_square_sf(stat: f64) -> SelectionResult<f64> {
    let dist = ChiSquared::new(1.0)
        .map_err(|err| SelectionError::Distribution { reason: err.to_string() })?;
    Ok(dist.sf(stat))
}

#[cfg(feature = "obs_slog")]
fn log_comparison(
    logger: &slog::Logger, fit_h1: &PolynomialFit, fit_h2: &PolynomialFit, ratio: &PosteriorRatio,
) {
    slog::info!(logger, "model comparison";
        "n" => fit_h1.n_obs(),
        "chi2_h1" => fit_h1.chi2(),
        "chi2_h2" => fit_h2.chi2(),
        "delta_lambda" => ratio.delta_lambda(),
        "occam_factor" => ratio.occam_factor(),
        "posterior_ratio" => ratio.value()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitting::{CovarianceScaling, FitError};
    use approx::assert_relative_eq;
    use ndarray::{Array1, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Agreement of `compare` with the stepwise fit / ratio path.
    // - `χ²_H2 <= χ²_H1` and the LRT statistic / p-value relationship.
    // - Propagation of fitting errors for too few points.
    // - Use of the configured covariance scaling in both fits.
    //
    // - Logger construction and injection under `obs_slog`.
    //
    // They intentionally DO NOT cover:
    // - The content of log records (side effect only).
    // -------------------------------------------------------------------------

    fn noisy_dataset() -> Dataset {
        let x = Array1::linspace(-5.0, 5.0, 11);
        let y = array![-10.3, -7.6, -6.3, -3.8, -2.2, 0.3, 1.7, 4.4, 5.8, 8.4, 10.1];
        Dataset::new(x, y, 0.3).unwrap()
    }

    fn estimator(scaling: CovarianceScaling) -> PosteriorRatioEstimator {
        PosteriorRatioEstimator::new(
            PosteriorRatioOptions::new(None, 2.0).unwrap().with_scaling(scaling),
        )
    }

    #[test]
    // Purpose
    // -------
    // Verify that `compare` matches fitting and combining by hand.
    //
    // Given
    // -----
    // - A noisy 11-point dataset and width 2.
    //
    // Expect
    // ------
    // - Identical fits and ratio; χ²_H2 <= χ²_H1; LRT statistic equals Δχ².
    fn compare_matches_stepwise_pipeline() {
        // Arrange
        let data = noisy_dataset();
        let est = estimator(CovarianceScaling::KnownSigma);
        let h1 = fit_polynomial_with(&data, 1, CovarianceScaling::KnownSigma).unwrap();
        let h2 = fit_polynomial_with(&data, 2, CovarianceScaling::KnownSigma).unwrap();
        let expected = compute_posterior_ratio(&h1, &h2, est.options()).unwrap();

        // Act
        let cmp = est.compare(&data).unwrap();

        // Assert
        assert_eq!(cmp.fit_h1(), &h1);
        assert_eq!(cmp.fit_h2(), &h2);
        assert_eq!(cmp.ratio(), &expected);
        assert!(cmp.fit_h2().chi2() <= cmp.fit_h1().chi2() + 1e-12);
        assert_relative_eq!(cmp.lrt_statistic(), expected.delta_chi2().max(0.0));
        assert!((0.0..=1.0).contains(&cmp.lrt_p_value()));
    }

    #[test]
    // Purpose
    // -------
    // Check the LRT p-value at its boundary.
    //
    // Given
    // -----
    // - Exactly linear data (Δχ² ≈ 0).
    //
    // Expect
    // ------
    // - p-value ≈ 1.
    fn lrt_p_value_is_one_without_improvement() {
        // Arrange
        let x = Array1::linspace(0.0, 10.0, 6);
        let y = x.mapv(|v| 3.0 - 0.5 * v);
        let data = Dataset::new(x, y, 1.0).unwrap();

        // Act
        let cmp = estimator(CovarianceScaling::KnownSigma).compare(&data).unwrap();

        // Assert
        assert!(cmp.lrt_statistic() < 1e-12);
        assert_relative_eq!(cmp.lrt_p_value(), 1.0, epsilon = 1e-5);
    }

    #[test]
    // Purpose
    // -------
    // Ensure fitting failures surface as `SelectionError::Fit`.
    //
    // Given
    // -----
    // - Two observations (degree 2 needs three).
    //
    // Expect
    // ------
    // - `Fit(UnderdeterminedFit { n: 2, degree: 2 })`.
    fn compare_with_two_points_returns_underdetermined_fit() {
        // Arrange
        let data = Dataset::new(array![0.0, 1.0], array![0.0, 1.0], 1.0).unwrap();

        // Act
        let result = estimator(CovarianceScaling::KnownSigma).compare(&data);

        // Assert
        assert_eq!(
            result,
            Err(SelectionError::Fit(FitError::UnderdeterminedFit { n: 2, degree: 2 }))
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify that the configured scaling reaches both fits.
    //
    // Given
    // -----
    // - Residual-variance scaling on the noisy dataset.
    //
    // Expect
    // ------
    // - Both covariances report `ResidualVariance`; δλ² equals
    //   SSR/(n − 3) · (XᵀX)⁻¹[0, 0], i.e. the KnownSigma variance rescaled
    //   by the reduced chi-square.
    fn compare_uses_configured_scaling() {
        // Arrange
        let data = noisy_dataset();
        let known = estimator(CovarianceScaling::KnownSigma).compare(&data).unwrap();

        // Act
        let residual = estimator(CovarianceScaling::ResidualVariance).compare(&data).unwrap();

        // Assert
        for fit in [residual.fit_h1(), residual.fit_h2()] {
            assert_eq!(fit.covariance().unwrap().scaling(), CovarianceScaling::ResidualVariance);
        }
        let red = residual.fit_h2().reduced_chi2().unwrap();
        assert_relative_eq!(
            residual.ratio().delta_lambda().powi(2),
            known.ratio().delta_lambda().powi(2) * red,
            max_relative = 1e-8
        );
    }

    #[cfg(feature = "obs_slog")]
    #[test]
    // Purpose
    // -------
    // Check that the logger exists only for verbose estimators and is shared
    // across clones.
    //
    // Given
    // -----
    // - Default options, and the same options with `verbose`.
    //
    // Expect
    // ------
    // - No logger when quiet; one logger when verbose, kept by a clone.
    fn logger_is_built_once_for_verbose_estimators() {
        // Arrange
        let opts = PosteriorRatioOptions::new(None, 2.0).unwrap();

        // Act
        let quiet = PosteriorRatioEstimator::new(opts);
        let verbose = PosteriorRatioEstimator::new(opts.with_verbose(true));
        let cloned = verbose.clone();

        // Assert
        assert!(quiet.logger().is_none());
        assert!(verbose.logger().is_some());
        assert!(cloned.logger().is_some());
    }

    #[cfg(feature = "obs_slog")]
    #[test]
    // Purpose
    // -------
    // Verify that an injected logger is used by repeated comparisons without
    // changing their results.
    //
    // Given
    // -----
    // - A verbose estimator with a `slog::Discard` logger, and a quiet one.
    //
    // Expect
    // ------
    // - Both succeed twice with identical comparisons.
    fn injected_logger_leaves_comparison_unchanged() {
        // Arrange
        let data = noisy_dataset();
        let opts = PosteriorRatioOptions::new(None, 2.0).unwrap();
        let quiet = PosteriorRatioEstimator::new(opts);
        let verbose = PosteriorRatioEstimator::new(opts.with_verbose(true))
            .with_logger(slog::Logger::root(slog::Discard, slog::o!()));

        // Act
        let first = verbose.compare(&data).unwrap();
        let second = verbose.compare(&data).unwrap();

        // Assert
        assert_eq!(first, second);
        assert_eq!(first, quiet.compare(&data).unwrap());
    }
}
