//! fitting::covariance — coefficient covariance of a least-squares fit.
//!
//! Purpose
//! -------
//! Build the covariance matrix of the least-squares coefficients,
//! `Cov(β̂) = s² (XᵀX)⁻¹`, from the SVD of the scaled design, and expose its
//! diagonal as per-coefficient standard errors.
//!
//! Key behaviors
//! -------------
//! - Take the pseudo-inverse factor `W = V Σ⁺` of the scaled design from
//!   the least-squares solve, so `(TᵀT)⁺ = W Wᵀ` without forming `TᵀT`.
//! - Map to the raw basis with `Cov(β) = s² (M W)(M W)ᵀ`, where `β = M γ`;
//!   the result is positive semi-definite by construction.
//! - Carry the numerical rank of the scaled design, so callers can tell a
//!   singular design (repeated or collinear abscissae) from a
//!   well-identified one.
//! - Scale by `s²`, chosen through [`CovarianceScaling`].
//!
//! Conventions
//! -----------
//! - No explicit matrix inverse is formed.
//! - The matrix layout follows the coefficient ordering of the fit
//!   (highest power first).

use nalgebra::DMatrix;
use ndarray::{Array1, Array2};

/// CovarianceScaling — how the unscaled `(XᵀX)⁻¹` is turned into `Cov(β̂)`.
///
/// Variants
/// --------
/// - `KnownSigma`
///   `s² = σ²`, the known noise variance of the dataset. The resulting
///   standard errors do not depend on how well the model happens to fit.
/// - `ResidualVariance`
///   `s² = SSR / (n − k)`, the unbiased residual variance. Matches the
///   scaled covariance reported by common polynomial-fit routines; needs
///   `n > k` and collapses towards zero for exactly fitting models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CovarianceScaling {
    #[default]
    KnownSigma,
    ResidualVariance,
}

impl std::str::FromStr for CovarianceScaling {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "known_sigma" | "known" | "sigma" => Ok(CovarianceScaling::KnownSigma),
            "residual_variance" | "residual" => Ok(CovarianceScaling::ResidualVariance),
            other => Err(format!("unknown covariance scaling '{other}'")),
        }
    }
}

/// ParamCovariance — covariance matrix of fitted polynomial coefficients.
///
/// Fields
/// ------
/// - `matrix`: `Array2<f64>`
///   `k × k` covariance, highest power first.
/// - `rank`: `usize`
///   Numerical rank of the scaled design (retained singular values).
/// - `scaling`: [`CovarianceScaling`]
///   Convention that produced `matrix`.
///
/// Invariants
/// ----------
/// - `rank <= k`; when `rank < k` the matrix is a pseudoinverse and entries
///   along unidentified directions are not meaningful.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamCovariance {
    matrix: Array2<f64>,
    rank: usize,
    scaling: CovarianceScaling,
}

impl ParamCovariance {
    /// Full `k × k` covariance matrix.
    pub fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    /// Numerical rank of the normal matrix.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Number of coefficients `k`.
    pub fn n_params(&self) -> usize {
        self.matrix.nrows()
    }

    /// Scaling convention used to build the matrix.
    pub fn scaling(&self) -> CovarianceScaling {
        self.scaling
    }

    /// `true` when every coefficient is identified (`rank == k`).
    pub fn is_full_rank(&self) -> bool {
        self.rank == self.n_params()
    }

    /// Diagonal entry `Var(β̂_index)`, or `None` when out of range.
    pub fn variance(&self, index: usize) -> Option<f64> {
        (index < self.n_params()).then(|| self.matrix[[index, index]])
    }

    /// Square roots of the diagonal.
    pub fn standard_errors(&self) -> Array1<f64> {
        self.matrix.diag().mapv(f64::sqrt)
    }
}

/// estimate_covariance — scaled covariance in the raw coefficient basis.
///
/// Parameters
/// ----------
/// - `pinv_factor`: `&DMatrix<f64>`
///   `W = V Σ⁺` of the scaled design (`k × k`).
/// - `to_raw`: `&DMatrix<f64>`
///   Map `M` from scaled to raw coefficients (`k × k`).
/// - `rank`: `usize`
///   Numerical rank of the scaled design.
/// - `scale`: `f64`
///   Variance factor `s²`.
/// - `scaling`: [`CovarianceScaling`]
///   Recorded on the result for reporting.
///
/// Returns
/// -------
/// [`ParamCovariance`] with `matrix = s² (M W)(M W)ᵀ`.
pub(crate) fn estimate_covariance(
    pinv_factor: &DMatrix<f64>, to_raw: &DMatrix<f64>, rank: usize, scale: f64,
    scaling: CovarianceScaling,
) -> ParamCovariance {
    let factor = to_raw * pinv_factor;
    let cov = &factor * factor.transpose() * scale;
    let k = cov.nrows();
    let matrix = Array2::from_shape_fn((k, k), |(i, j)| cov[(i, j)]);
    ParamCovariance { matrix, rank, scaling }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Agreement with the analytic inverse for a diagonal factor.
    // - Propagation of the scaled-to-raw basis map and the reported rank.
    // - Parsing of `CovarianceScaling` names.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Check the identity map against an analytic inverse.
    //
    // Given
    // -----
    // - W = diag(1/2, 1) (so (TᵀT)⁻¹ = diag(1/4, 1)), M = I, s² = 2.
    //
    // Expect
    // ------
    // - Cov = diag(0.5, 2), rank 2, standard errors [√0.5, √2].
    fn estimate_covariance_identity_map_matches_analytic_inverse() {
        // Arrange
        let w = DMatrix::from_row_slice(2, 2, &[0.5, 0.0, 0.0, 1.0]);
        let identity = DMatrix::<f64>::identity(2, 2);

        // Act
        let cov = estimate_covariance(&w, &identity, 2, 2.0, CovarianceScaling::KnownSigma);

        // Assert
        assert_eq!(cov.rank(), 2);
        assert!(cov.is_full_rank());
        assert_relative_eq!(cov.matrix()[[0, 0]], 0.5, epsilon = 1e-12);
        assert_relative_eq!(cov.matrix()[[1, 1]], 2.0, epsilon = 1e-12);
        assert_relative_eq!(cov.matrix()[[0, 1]], 0.0, epsilon = 1e-12);
        let se = cov.standard_errors();
        assert_relative_eq!(se[0], 0.5_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(se[1], 2.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Verify that the basis map propagates into the covariance.
    //
    // Given
    // -----
    // - W = I, M = [[1/h, 0], [−c/h, 1]] with c = 10, h = 2 (a line
    //   fitted on t = (x − c)/h), s² = 1, rank reported as 1.
    //
    // Expect
    // ------
    // - Var(slope) = 1/h² = 0.25, Cov(slope, intercept) = −c/h² = −2.5.
    // - The reported rank is carried through unchanged.
    fn estimate_covariance_applies_basis_map() {
        // Arrange
        let w = DMatrix::<f64>::identity(2, 2);
        let map = DMatrix::from_row_slice(2, 2, &[0.5, 0.0, -5.0, 1.0]);

        // Act
        let cov = estimate_covariance(&w, &map, 1, 1.0, CovarianceScaling::ResidualVariance);

        // Assert
        assert_relative_eq!(cov.variance(0).unwrap(), 0.25, epsilon = 1e-12);
        assert_relative_eq!(cov.matrix()[[0, 1]], -2.5, epsilon = 1e-12);
        assert_relative_eq!(cov.matrix()[[1, 0]], -2.5, epsilon = 1e-12);
        assert_eq!(cov.rank(), 1);
        assert!(!cov.is_full_rank());
        assert_eq!(cov.scaling(), CovarianceScaling::ResidualVariance);
        assert_eq!(cov.variance(5), None);
    }

    #[test]
    // Purpose
    // -------
    // Verify the accepted spellings of `CovarianceScaling`.
    //
    // Given
    // -----
    // - "known_sigma", "RESIDUAL", and an unknown name.
    //
    // Expect
    // ------
    // - The first two parse; the unknown name is rejected.
    fn covariance_scaling_parses_known_names() {
        assert_eq!("known_sigma".parse::<CovarianceScaling>(), Ok(CovarianceScaling::KnownSigma));
        assert_eq!("RESIDUAL".parse::<CovarianceScaling>(), Ok(CovarianceScaling::ResidualVariance));
        assert!("bootstrap".parse::<CovarianceScaling>().is_err());
    }
}
