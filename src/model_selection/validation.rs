//! model_selection::validation — shared guards for options and model pairs.
//!
//! Purpose
//! -------
//! Centralise the checks that run before a posterior ratio is computed:
//! strictly positive configuration values and structural compatibility of
//! the two fits being compared.
//!
//! Invariants & assumptions
//! ------------------------
//! - Configuration scalars must be finite and `> 0`.
//! - The richer model must have exactly one more coefficient than the
//!   simpler one and be fitted to the same observations and noise level.
//!
//! Conventions
//! -----------
//! - Pure validation: no allocation beyond error construction.
//! - Dataset identity is checked through `n` and `σ`; the fits do not keep
//!   a copy of the observations.

use crate::fitting::polyfit::PolynomialFit;
use crate::model_selection::errors::{SelectionError, SelectionResult};

/// Validate that a configuration scalar is finite and strictly positive.
///
/// Errors
/// ------
/// - `SelectionError::InvalidConfiguration { param, value, .. }` otherwise.
pub fn validate_positive(param: &'static str, value: f64) -> SelectionResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SelectionError::InvalidConfiguration {
            param,
            value,
            reason: "must be finite and > 0",
        });
    }
    Ok(())
}

/// Validate that `richer` nests `simpler` with one extra coefficient.
///
/// Errors
/// ------
/// - `SelectionError::DegreeMismatch` unless `richer.degree() == simpler.degree() + 1`.
/// - `SelectionError::DatasetMismatch` when `n` or `σ` differ.
/// - `SelectionError::MissingCovariance` when `richer` has no covariance.
pub fn validate_nested_pair(simpler: &PolynomialFit, richer: &PolynomialFit) -> SelectionResult<()> {
    if richer.degree() != simpler.degree() + 1 {
        return Err(SelectionError::DegreeMismatch {
            simpler: simpler.degree(),
            richer: richer.degree(),
        });
    }
    if simpler.n_obs() != richer.n_obs() {
        return Err(SelectionError::DatasetMismatch { reason: "observation counts differ" });
    }
    if simpler.sigma() != richer.sigma() {
        return Err(SelectionError::DatasetMismatch { reason: "noise levels differ" });
    }
    if richer.covariance().is_none() {
        return Err(SelectionError::MissingCovariance { degree: richer.degree() });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitting::{Dataset, fit_polynomial};
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Accept/reject branches of `validate_positive`.
    // - Each error branch of `validate_nested_pair` and the success path.
    // -------------------------------------------------------------------------

    fn dataset(sigma: f64) -> Dataset {
        Dataset::new(array![0.0, 1.0, 2.0, 3.0, 4.0], array![0.1, 1.2, 3.9, 9.1, 15.8], sigma)
            .unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Verify `validate_positive` on positive, zero, negative, and NaN values.
    //
    // Given
    // -----
    // - 1.0, 0.0, -2.0, NaN for "prior_odds".
    //
    // Expect
    // ------
    // - Only 1.0 is accepted.
    fn validate_positive_rejects_non_positive_and_nan() {
        assert!(validate_positive("prior_odds", 1.0).is_ok());
        for bad in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            match validate_positive("prior_odds", bad) {
                Err(SelectionError::InvalidConfiguration { param: "prior_odds", .. }) => (),
                other => panic!("expected InvalidConfiguration for {bad}, got {other:?}"),
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that a linear/quadratic pair on the same data is accepted.
    //
    // Given
    // -----
    // - Degree 1 and degree 2 fits of one dataset.
    //
    // Expect
    // ------
    // - `Ok(())`.
    fn validate_nested_pair_accepts_linear_and_quadratic() {
        // Arrange
        let data = dataset(0.5);
        let h1 = fit_polynomial(&data, 1).unwrap();
        let h2 = fit_polynomial(&data, 2).unwrap();

        // Act / Assert
        assert!(validate_nested_pair(&h1, &h2).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Ensure non-nested, swapped, or mismatched pairs are rejected.
    //
    // Given
    // -----
    // - Degrees (1, 3), (2, 1), (0, 1) on one dataset and (1, 2) across
    //   datasets with different σ.
    //
    // Expect
    // ------
    // - `DegreeMismatch`, `DegreeMismatch`, `Ok`, `DatasetMismatch`.
    fn validate_nested_pair_rejects_incompatible_fits() {
        // Arrange
        let data = dataset(0.5);
        let other = dataset(1.0);
        let h0 = fit_polynomial(&data, 0).unwrap();
        let h1 = fit_polynomial(&data, 1).unwrap();
        let h2 = fit_polynomial(&data, 2).unwrap();
        let h3 = fit_polynomial(&data, 3).unwrap();
        let h2_other = fit_polynomial(&other, 2).unwrap();

        // Act / Assert
        assert_eq!(
            validate_nested_pair(&h1, &h3),
            Err(SelectionError::DegreeMismatch { simpler: 1, richer: 3 })
        );
        assert_eq!(
            validate_nested_pair(&h2, &h1),
            Err(SelectionError::DegreeMismatch { simpler: 2, richer: 1 })
        );
        assert!(validate_nested_pair(&h0, &h1).is_ok());
        assert!(matches!(
            validate_nested_pair(&h1, &h2_other),
            Err(SelectionError::DatasetMismatch { .. })
        ));
    }
}
