//! model_selection::posterior_ratio — Occam-penalised posterior ratio.
//!
//! Purpose
//! -------
//! Combine a simpler fit `H1` and a richer nested fit `H2` (one extra
//! coefficient) into the posterior ratio
//!
//! ```text
//! PR = P(H1)/P(H2) · exp(−(χ²_H1 − χ²_H2)) · (λ_max − λ_min) / (δλ √(2π))
//! ```
//!
//! where `δλ` is the one-sigma uncertainty of the coefficient `H2` adds.
//!
//! Key behaviors
//! -------------
//! - Validate that the fits are nested and share a dataset.
//! - Read `δλ = √Cov(β̂)[0, 0]` from the richer fit (index 0 is the added,
//!   highest-power coefficient).
//! - Evaluate `ln PR` term by term and exponentiate once, so large χ²
//!   differences underflow cleanly to 0 instead of producing NaN.
//! - Expose every factor of the product on [`PosteriorRatio`].
//!
//! Invariants & assumptions
//! ------------------------
//! - A returned ratio is finite and non-negative.
//! - `DegenerateCovariance` is raised when the richer design is rank
//!   deficient or the added coefficient's variance is `<= 0` or non-finite.
//!
//! Conventions
//! -----------
//! - `PR ≫ 1` favours H1, `PR ≪ 1` favours H2, `PR ≈ 1` is inconclusive.
//!   [`PosteriorRatio::preference`] applies that reading with a caller
//!   chosen decision factor; the ratio itself carries no verdict.

use std::f64::consts::PI;

use crate::fitting::polyfit::PolynomialFit;
use crate::model_selection::{
    errors::{SelectionError, SelectionResult},
    options::PosteriorRatioOptions,
    validation::validate_nested_pair,
};

/// Index of the coefficient the richer model adds (highest power first).
pub const EXTRA_PARAM_INDEX: usize = 0;

/// Preference — reading of a posterior ratio against a decision factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preference {
    /// `PR >= decisive`: the simpler model suffices.
    FavorsSimpler,
    /// `PR <= 1 / decisive`: the extra coefficient is justified.
    FavorsRicher,
    /// Neither threshold reached.
    Inconclusive,
}

/// PosteriorRatio — the ratio and each factor it is built from.
///
/// Fields
/// ------
/// - `value`: `f64` — `PR`, finite and `>= 0`.
/// - `log_value`: `f64` — `ln PR`.
/// - `prior_odds`: `f64` — `P(H1) / P(H2)`.
/// - `delta_chi2`: `f64` — `χ²_H1 − χ²_H2`.
/// - `likelihood_ratio`: `f64` — `exp(−Δχ²)`.
/// - `delta_lambda`: `f64` — `δλ`.
/// - `occam_factor`: `f64` — `(λ_max − λ_min) / (δλ √(2π))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PosteriorRatio {
    value: f64,
    log_value: f64,
    prior_odds: f64,
    delta_chi2: f64,
    likelihood_ratio: f64,
    delta_lambda: f64,
    occam_factor: f64,
}

impl PosteriorRatio {
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn log_value(&self) -> f64 {
        self.log_value
    }

    pub fn prior_odds(&self) -> f64 {
        self.prior_odds
    }

    pub fn delta_chi2(&self) -> f64 {
        self.delta_chi2
    }

    pub fn likelihood_ratio(&self) -> f64 {
        self.likelihood_ratio
    }

    pub fn delta_lambda(&self) -> f64 {
        self.delta_lambda
    }

    pub fn occam_factor(&self) -> f64 {
        self.occam_factor
    }

    /// Classify the ratio with a symmetric decision factor `decisive >= 1`.
    ///
    /// Errors
    /// ------
    /// - `SelectionError::InvalidConfiguration` when `decisive` is not
    ///   finite or below 1.
    ///
    /// Examples
    /// --------
    /// Jeffreys' "strong" evidence corresponds to a factor of 10:
    ///
    /// ```rust
    /// # use ndarray::Array1;
    /// # use posterior_ratio::fitting::{Dataset, fit_polynomial};
    /// # use posterior_ratio::model_selection::{Preference, PosteriorRatioOptions, compute_posterior_ratio};
    /// let x = Array1::linspace(-5.0, 5.0, 11);
    /// let y = x.mapv(|v| 2.0 * v + 0.05 * v * v);
    /// let data = Dataset::new(x, y, 0.5).unwrap();
    /// let h1 = fit_polynomial(&data, 1).unwrap();
    /// let h2 = fit_polynomial(&data, 2).unwrap();
    /// let opts = PosteriorRatioOptions::new(None, 1.0).unwrap();
    /// let pr = compute_posterior_ratio(&h1, &h2, &opts).unwrap();
    /// assert_eq!(pr.preference(10.0).unwrap(), Preference::FavorsRicher);
    /// ```
    pub fn preference(&self, decisive: f64) -> SelectionResult<Preference> {
        if !decisive.is_finite() || decisive < 1.0 {
            return Err(SelectionError::InvalidConfiguration {
                param: "decisive",
                value: decisive,
                reason: "must be finite and >= 1",
            });
        }
        let preference = if self.value >= decisive {
            Preference::FavorsSimpler
        } else if self.value <= 1.0 / decisive {
            Preference::FavorsRicher
        } else {
            Preference::Inconclusive
        };
        Ok(preference)
    }
}

/// compute_posterior_ratio — Occam-penalised ratio of two nested fits.
///
/// Parameters
/// ----------
/// - `fit_h1`: `&PolynomialFit`
///   Simpler model (e.g. degree 1).
/// - `fit_h2`: `&PolynomialFit`
///   Richer model with exactly one extra coefficient; must carry a
///   covariance.
/// - `opts`: `&PosteriorRatioOptions`
///   Prior odds and prior range width.
///
/// Returns
/// -------
/// `SelectionResult<PosteriorRatio>`
///
/// Errors
/// ------
/// - `SelectionError::DegreeMismatch`, `DatasetMismatch`, `MissingCovariance`
///   from pair validation.
/// - `SelectionError::DegenerateCovariance` when the richer normal matrix
///   is rank deficient or `Var(β̂₀)` is `<= 0` or non-finite.
/// - `SelectionError::NonFiniteRatio` when `exp(ln PR)` overflows.
///
/// Notes
/// -----
/// - `ln PR = ln(odds) − Δχ² + ln(width) − ln δλ − ½ ln 2π`.
pub fn compute_posterior_ratio(
    fit_h1: &PolynomialFit, fit_h2: &PolynomialFit, opts: &PosteriorRatioOptions,
) -> SelectionResult<PosteriorRatio> {
    validate_nested_pair(fit_h1, fit_h2)?;
    let delta_lambda = extra_param_uncertainty(fit_h2)?;

    let prior_odds = opts.prior_odds();
    let delta_chi2 = fit_h1.chi2() - fit_h2.chi2();
    let log_occam = opts.lambda_range_width().ln() - delta_lambda.ln() - 0.5 * (2.0 * PI).ln();
    let log_value = prior_odds.ln() - delta_chi2 + log_occam;

    let value = log_value.exp();
    if !value.is_finite() {
        return Err(SelectionError::NonFiniteRatio { log_value });
    }

    Ok(PosteriorRatio {
        value,
        log_value,
        prior_odds,
        delta_chi2,
        likelihood_ratio: (-delta_chi2).exp(),
        delta_lambda,
        occam_factor: log_occam.exp(),
    })
}

// ---- Helper methods ----

fn extra_param_uncertainty(fit_h2: &PolynomialFit) -> SelectionResult<f64> {
    let cov = fit_h2
        .covariance()
        .ok_or(SelectionError::MissingCovariance { degree: fit_h2.degree() })?;
    let variance = cov.variance(EXTRA_PARAM_INDEX).unwrap_or(f64::NAN);
    if !cov.is_full_rank() || !variance.is_finite() || variance <= 0.0 {
        return Err(SelectionError::DegenerateCovariance {
            variance,
            rank: cov.rank(),
            n_params: cov.n_params(),
        });
    }
    Ok(variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitting::{Dataset, fit_polynomial};
    use approx::assert_relative_eq;
    use ndarray::{Array1, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The reference scenario y = 2x + 0.05x² on x = −5..5 against the
    //   analytic Δχ² and δλ.
    // - Noise-free linear data favouring the simpler model.
    // - Prior odds and range width entering multiplicatively.
    // - DegenerateCovariance for repeated abscissae.
    // - `Preference` thresholds and validation.
    //
    // They intentionally DO NOT cover:
    // - Pair validation branches; see `model_selection::validation`.
    // -------------------------------------------------------------------------

    fn grid() -> Array1<f64> {
        Array1::linspace(-5.0, 5.0, 11)
    }

    fn fits_for(y: Array1<f64>, sigma: f64) -> (PolynomialFit, PolynomialFit) {
        let data = Dataset::new(grid(), y, sigma).unwrap();
        (fit_polynomial(&data, 1).unwrap(), fit_polynomial(&data, 2).unwrap())
    }

    #[test]
    // Purpose
    // -------
    // Verify the reference scenario end to end.
    //
    // Given
    // -----
    // - x = −5..5 (11 points), y = 2x + 0.05x², σ = 0.5, width = 1, odds 1.
    // - Analytically Σ(x² − 10)² = 858, so
    //   Δχ² = 0.05² · 858 / σ² = 8.58 and δλ = σ / √858.
    //
    // Expect
    // ------
    // - H1 slope ≈ 2 with χ² > 0; H2 coefficients ≈ [0.05, 2, 0], χ² ≈ 0.
    // - Δχ², δλ, and ln PR match the analytic values; PR < 1.
    fn reference_quadratic_scenario_favours_quadratic_model() {
        // Arrange
        let y = grid().mapv(|x| 2.0 * x + 0.05 * x * x);
        let (h1, h2) = fits_for(y, 0.5);
        let opts = PosteriorRatioOptions::new(None, 1.0).unwrap();

        // Act
        let pr = compute_posterior_ratio(&h1, &h2, &opts).unwrap();

        // Assert
        assert_relative_eq!(h1.coefficients()[0], 2.0, epsilon = 1e-10);
        assert!(h1.chi2() > 1.0);
        assert_relative_eq!(h2.coefficients()[0], 0.05, epsilon = 1e-10);
        assert_relative_eq!(h2.coefficients()[1], 2.0, epsilon = 1e-10);
        assert_relative_eq!(h2.coefficients()[2], 0.0, epsilon = 1e-10);
        assert!(h2.chi2() < 1e-18);

        let expected_delta_lambda = 0.5 / 858.0_f64.sqrt();
        let expected_log = -8.58 - expected_delta_lambda.ln() - 0.5 * (2.0 * PI).ln();
        assert_relative_eq!(pr.delta_chi2(), 8.58, max_relative = 1e-9);
        assert_relative_eq!(pr.delta_lambda(), expected_delta_lambda, max_relative = 1e-9);
        assert_relative_eq!(pr.log_value(), expected_log, max_relative = 1e-9);
        assert!(pr.value() < 1.0, "PR = {}", pr.value());
        assert!(pr.value() >= 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Check that exactly linear data favours the simpler model.
    //
    // Given
    // -----
    // - y = 1 + 2x without noise, σ = 0.5, width = 1.
    //
    // Expect
    // ------
    // - χ²_H1 ≈ 0, likelihood ratio ≈ 1, PR ≈ Occam factor > 1.
    fn exact_linear_data_gives_large_ratio() {
        // Arrange
        let y = grid().mapv(|x| 1.0 + 2.0 * x);
        let (h1, h2) = fits_for(y, 0.5);
        let opts = PosteriorRatioOptions::new(None, 1.0).unwrap();

        // Act
        let pr = compute_posterior_ratio(&h1, &h2, &opts).unwrap();

        // Assert
        assert!(h1.chi2() < 1e-18);
        assert_relative_eq!(pr.likelihood_ratio(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(pr.value(), pr.occam_factor(), max_relative = 1e-9);
        assert!(pr.value() > 1.0, "PR = {}", pr.value());
        assert_eq!(pr.preference(10.0).unwrap(), Preference::FavorsSimpler);
    }

    #[test]
    // Purpose
    // -------
    // Verify that prior odds and range width scale PR linearly.
    //
    // Given
    // -----
    // - The same noisy fits evaluated with (odds 1, width 1) and
    //   (odds 0.6, width 4).
    //
    // Expect
    // ------
    // - PR₂ / PR₁ = 0.6 · 4.
    fn prior_odds_and_width_scale_ratio_multiplicatively() {
        // Arrange
        let y = array![-9.8, -8.1, -6.2, -3.7, -2.1, 0.2, 1.9, 4.3, 6.0, 8.2, 9.9];
        let (h1, h2) = fits_for(y, 0.4);
        let base = PosteriorRatioOptions::new(None, 1.0).unwrap();
        let scaled = PosteriorRatioOptions::new(Some(0.6), 4.0).unwrap();

        // Act
        let pr_base = compute_posterior_ratio(&h1, &h2, &base).unwrap();
        let pr_scaled = compute_posterior_ratio(&h1, &h2, &scaled).unwrap();

        // Assert
        assert_relative_eq!(pr_scaled.value() / pr_base.value(), 2.4, max_relative = 1e-10);
    }

    #[test]
    // Purpose
    // -------
    // Ensure that repeated abscissae (x² collinear with x and 1) raise
    // DegenerateCovariance.
    //
    // Given
    // -----
    // - x = [1, 1, 2, 2]: only two distinct values for a 3-coefficient model.
    //
    // Expect
    // ------
    // - Both fits succeed; `DegenerateCovariance { rank: 2, n_params: 3, .. }`.
    fn repeated_abscissae_raise_degenerate_covariance() {
        // Arrange
        let data = Dataset::new(array![1.0, 1.0, 2.0, 2.0], array![1.0, 1.1, 2.0, 2.1], 0.1)
            .unwrap();
        let h1 = fit_polynomial(&data, 1).unwrap();
        let h2 = fit_polynomial(&data, 2).unwrap();
        let opts = PosteriorRatioOptions::new(None, 1.0).unwrap();

        // Act
        let result = compute_posterior_ratio(&h1, &h2, &opts);

        // Assert
        match result {
            Err(SelectionError::DegenerateCovariance { rank: 2, n_params: 3, .. }) => (),
            other => panic!("expected DegenerateCovariance, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify `preference` thresholds and its validation.
    //
    // Given
    // -----
    // - The reference scenario (PR ≈ 4e−3).
    //
    // Expect
    // ------
    // - FavorsRicher at factor 10, Inconclusive at factor 1000, error for 0.5.
    fn preference_applies_symmetric_thresholds() {
        // Arrange
        let y = grid().mapv(|x| 2.0 * x + 0.05 * x * x);
        let (h1, h2) = fits_for(y, 0.5);
        let opts = PosteriorRatioOptions::new(None, 1.0).unwrap();
        let pr = compute_posterior_ratio(&h1, &h2, &opts).unwrap();

        // Act / Assert
        assert_eq!(pr.preference(10.0).unwrap(), Preference::FavorsRicher);
        assert_eq!(pr.preference(1000.0).unwrap(), Preference::Inconclusive);
        assert!(matches!(
            pr.preference(0.5),
            Err(SelectionError::InvalidConfiguration { param: "decisive", .. })
        ));
    }
}
