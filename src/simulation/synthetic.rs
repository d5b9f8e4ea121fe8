//! simulation::synthetic — sampled grids and noisy polynomial observations.
//!
//! Purpose
//! -------
//! Generate the kind of data the model comparison is designed for: a
//! known polynomial evaluated on a uniform grid with additive Gaussian noise
//! of known standard deviation.
//!
//! Key behaviors
//! -------------
//! - [`uniform_grid`] builds an inclusive, equally spaced abscissa.
//! - [`simulate_dataset`] draws `yᵢ = p(xᵢ) + εᵢ`, `εᵢ ~ N(0, σ²)`, and
//!   returns a validated [`Dataset`] carrying the same `σ`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Truth coefficients are ordered highest power first, matching
//!   `PolynomialFit::coefficients`.
//! - With `SimOpts { seed: Some(s) }` the output is a pure function of the
//!   inputs and `s`.
//!
//! Conventions
//! -----------
//! - Randomness comes from `rand::rngs::StdRng`; noise from
//!   `rand_distr::Normal`.

use ndarray::Array1;
use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Normal};

use crate::fitting::dataset::Dataset;
use crate::simulation::errors::{SimError, SimResult};

/// SimOpts — RNG seeding for a single simulated dataset.
///
/// Fields
/// ------
/// - `seed`: `Option<u64>`
///   `Some(s)` for reproducible draws; `None` seeds from OS entropy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimOpts {
    pub seed: Option<u64>,
}

impl SimOpts {
    pub fn seeded(seed: u64) -> Self {
        SimOpts { seed: Some(seed) }
    }

    pub(crate) fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// uniform_grid — `n` equally spaced points from `start` to `stop` inclusive.
///
/// Errors
/// ------
/// - `SimError::InvalidGrid` when a bound is non-finite, `start >= stop`,
///   or `n < 2`.
///
/// Examples
/// --------
/// ```rust
/// # use posterior_ratio::simulation::uniform_grid;
/// let x = uniform_grid(-5.0, 5.0, 11).unwrap();
/// assert_eq!(x.len(), 11);
/// assert_eq!(x[5], 0.0);
/// ```
pub fn uniform_grid(start: f64, stop: f64, n: usize) -> SimResult<Array1<f64>> {
    if !start.is_finite() || !stop.is_finite() || start >= stop || n < 2 {
        return Err(SimError::InvalidGrid { start, stop, n });
    }
    Ok(Array1::linspace(start, stop, n))
}

/// simulate_dataset — noisy samples of a known polynomial.
///
/// Parameters
/// ----------
/// - `truth`: `&[f64]`
///   True coefficients, highest power first (`[0.05, 2.0, 0.0]` is
///   `0.05x² + 2x`).
/// - `x`: `&Array1<f64>`
///   Abscissae; copied into the dataset.
/// - `sigma`: `f64`
///   Noise standard deviation, also stored as the dataset's known `σ`.
/// - `opts`: `&SimOpts`
///
/// Returns
/// -------
/// `SimResult<Dataset>`
///
/// Errors
/// ------
/// - `SimError::EmptyTruth` when `truth` is empty.
/// - `SimError::InvalidNoise` when `sigma` is not finite or `<= 0`.
/// - `SimError::Fit(..)` when the resulting dataset fails validation
///   (empty `x`, non-finite values).
pub fn simulate_dataset(
    truth: &[f64], x: &Array1<f64>, sigma: f64, opts: &SimOpts,
) -> SimResult<Dataset> {
    let noise = noise_distribution(truth, sigma)?;
    let mut rng = opts.rng();
    sample_dataset(truth, x, sigma, &noise, &mut rng)
}

// ---- Helper methods ----

pub(crate) fn noise_distribution(truth: &[f64], sigma: f64) -> SimResult<Normal<f64>> {
    if truth.is_empty() {
        return Err(SimError::EmptyTruth);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(SimError::InvalidNoise { sigma, reason: "must be finite and > 0".to_string() });
    }
    Normal::new(0.0, sigma).map_err(|err| SimError::InvalidNoise { sigma, reason: err.to_string() })
}

pub(crate) fn sample_dataset<R: Rng>(
    truth: &[f64], x: &Array1<f64>, sigma: f64, noise: &Normal<f64>, rng: &mut R,
) -> SimResult<Dataset> {
    let y = x.mapv(|xi| evaluate_truth(truth, xi) + noise.sample(&mut *rng));
    Ok(Dataset::new(x.clone(), y, sigma)?)
}

fn evaluate_truth(truth: &[f64], x: f64) -> f64 {
    truth.iter().fold(0.0, |acc, &c| acc * x + c)
}
