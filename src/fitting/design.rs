//! fitting::design — scaled Vandermonde designs and the SVD least-squares solve.
//!
//! Purpose
//! -------
//! Build the polynomial design matrix on centred and scaled abscissae, solve
//! `min_γ ‖y − Tγ‖²` with a singular value decomposition of `T` itself, and
//! map the solution back to raw powers of `x`.
//!
//! Key behaviors
//! -------------
//! - [`ScaledBasis`] maps `x ↦ t = (x − c) / h` with `c` the midpoint and
//!   `h` the half-range of the abscissae, so `t ∈ [−1, 1]`. Offsets such
//!   as `x ∈ [10⁵, 10⁵ + 10]` no longer push powers of `x` past the
//!   precision of `f64`.
//! - [`solve_least_squares`] returns the coefficients in the scaled basis,
//!   the numerical rank, and the factor `W = V Σ⁺` with `(TᵀT)⁺ = W Wᵀ`.
//!   The normal matrix is never formed, so its squared condition number
//!   never enters.
//! - [`ScaledBasis::to_raw`] gives the linear map `M` with `β = M γ` and
//!   `Cov(β) = M Cov(γ) Mᵀ`. The leading coefficient maps with `1 / hᵈ`.
//!
//! Conventions
//! -----------
//! - Columns are ordered **highest power first**: row `i` of `T` is
//!   `[t_iᵈ, …, t_i, 1]`, and `M` maps between vectors in that order.
//! - Singular values at or below `s_max · SINGULAR_REL_TOL` are dropped in
//!   both the solve and the rank.
//! - `ndarray` is used at the module boundary and `nalgebra` internally.

use nalgebra::{DMatrix, DVector, SVD};
use ndarray::Array1;

use crate::fitting::errors::{FitError, FitResult};

/// Relative singular-value cutoff for the scaled design.
pub const SINGULAR_REL_TOL: f64 = 1e-10;

/// ScaledBasis — affine map from raw abscissae to `t ∈ [−1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ScaledBasis {
    center: f64,
    half_range: f64,
}

impl ScaledBasis {
    /// Midpoint / half-range map of `x`; a zero range maps with `h = 1`.
    pub(crate) fn from_abscissae(x: &Array1<f64>) -> Self {
        let lo = x.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = x.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let half_range = 0.5 * (hi - lo);
        ScaledBasis {
            center: lo + half_range,
            half_range: if half_range > 0.0 { half_range } else { 1.0 },
        }
    }

    pub(crate) fn transform(&self, x: f64) -> f64 {
        (x - self.center) / self.half_range
    }

    pub(crate) fn transform_all(&self, x: &Array1<f64>) -> Array1<f64> {
        x.mapv(|xi| self.transform(xi))
    }

    /// Map `M` (`k × k`, highest power first) with `β_raw = M γ_scaled`.
    ///
    /// Notes
    /// -----
    /// - `tʲ = h⁻ʲ Σ_{p ≤ j} C(j, p) (−c)^{j−p} xᵖ`, so
    ///   `M[d−p, d−j] = C(j, p) (−c)^{j−p} / hʲ` for `p <= j`.
    pub(crate) fn to_raw(&self, degree: usize) -> DMatrix<f64> {
        let k = degree + 1;
        let mut map = DMatrix::<f64>::zeros(k, k);
        for j in 0..=degree {
            let inv_scale = self.half_range.powi(j as i32).recip();
            for p in 0..=j {
                let shift = (-self.center).powi((j - p) as i32);
                map[(degree - p, degree - j)] = binomial(j, p) * shift * inv_scale;
            }
        }
        map
    }
}

/// Build the `n × (degree + 1)` Vandermonde matrix, highest power first.
pub(crate) fn vandermonde(t: &Array1<f64>, degree: usize) -> DMatrix<f64> {
    let n = t.len();
    let k = degree + 1;
    let mut design = DMatrix::<f64>::zeros(n, k);
    for (i, &ti) in t.iter().enumerate() {
        let mut power = 1.0;
        for j in (0..k).rev() {
            design[(i, j)] = power;
            power *= ti;
        }
    }
    design
}

/// LeastSquares — SVD solution of a (scaled) design.
///
/// Fields
/// ------
/// - `coefficients`: `DVector<f64>` — minimum-norm solution `γ`.
/// - `pinv_factor`: `DMatrix<f64>` — `W = V Σ⁺`, so `(TᵀT)⁺ = W Wᵀ`.
/// - `rank`: `usize` — retained singular values.
#[derive(Debug, Clone)]
pub(crate) struct LeastSquares {
    pub(crate) coefficients: DVector<f64>,
    pub(crate) pinv_factor: DMatrix<f64>,
    pub(crate) rank: usize,
}

/// solve_least_squares — SVD solution of an overdetermined linear system.
///
/// Parameters
/// ----------
/// - `design`: `&DMatrix<f64>`
///   `n × k` design matrix with `n >= k`.
/// - `y`: `&Array1<f64>`
///   Length-`n` right-hand side.
///
/// Returns
/// -------
/// `FitResult<LeastSquares>`
///
/// Errors
/// ------
/// - `FitError::Algebra`
///   When the SVD does not return its factors or the solution contains
///   non-finite entries.
///
/// Notes
/// -----
/// - `γ = Σ_{s_i > tol} v_i (u_iᵀ y) / s_i`. A rank-deficient design (e.g.
///   repeated abscissae) yields the minimum-norm solution and a reduced
///   rank rather than an error.
pub(crate) fn solve_least_squares(
    design: &DMatrix<f64>, y: &Array1<f64>,
) -> FitResult<LeastSquares> {
    let (n, k) = design.shape();
    let rhs = DVector::from_iterator(n, y.iter().copied());

    let decomp = SVD::new(design.clone(), true, true);
    let u = decomp.u.as_ref().ok_or(FitError::Algebra("SVD did not return U"))?;
    let v_t = decomp.v_t.as_ref().ok_or(FitError::Algebra("SVD did not return Vᵀ"))?;
    let tol = decomp.singular_values.max() * SINGULAR_REL_TOL;
    let projected = u.transpose() * &rhs;

    let mut coefficients = DVector::<f64>::zeros(k);
    let mut pinv_factor = DMatrix::<f64>::zeros(k, k);
    let mut rank = 0;
    for (i, &s) in decomp.singular_values.iter().enumerate() {
        if s <= tol {
            continue;
        }
        let column = v_t.row(i).transpose() / s;
        coefficients += &column * projected[i];
        pinv_factor.set_column(i, &column);
        rank += 1;
    }

    if coefficients.iter().any(|c| !c.is_finite()) {
        return Err(FitError::Algebra("non-finite coefficients"));
    }
    Ok(LeastSquares { coefficients, pinv_factor, rank })
}

// ---- Helper methods ----

fn binomial(n: usize, k: usize) -> f64 {
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}
