//! simulation::sweep — Monte Carlo behaviour of the posterior ratio.
//!
//! Purpose
//! -------
//! Repeat the linear vs quadratic comparison over independent noise
//! realisations of one truth polynomial and summarise how the log posterior
//! ratio is distributed. This answers "how often would this design and
//! noise level detect the curvature?" before any real data is collected.
//!
//! Key behaviors
//! -------------
//! - One master `StdRng` (seeded from [`SweepOptions::seed`]) draws a fresh
//!   `u64` seed per replication, so replications are independent and the
//!   whole sweep is reproducible from one seed.
//! - Replications run sequentially; the first failing replication aborts
//!   the sweep with its error.
//! - [`SweepSummary`] keeps every `ln PR` plus mean, median, and the
//!   fraction of replications favouring the richer model (`PR < 1`).
//!
//! Invariants & assumptions
//! ------------------------
//! - `replications >= 1`.
//! - Every replication uses the same abscissae, truth, and `σ`.

use ndarray::Array1;
use rand::Rng;

use crate::model_selection::estimator::PosteriorRatioEstimator;
use crate::simulation::{
    errors::{SimError, SimResult},
    synthetic::{SimOpts, noise_distribution, sample_dataset},
};

/// SweepOptions — size and seeding of a Monte Carlo sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepOptions {
    replications: usize,
    seed: Option<u64>,
}

impl SweepOptions {
    /// Construct validated sweep options.
    ///
    /// Errors
    /// ------
    /// - `SimError::InvalidReplications` when `replications == 0`.
    pub fn new(replications: usize, seed: Option<u64>) -> SimResult<Self> {
        if replications == 0 {
            return Err(SimError::InvalidReplications { replications });
        }
        Ok(SweepOptions { replications, seed })
    }

    pub fn replications(&self) -> usize {
        self.replications
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

/// SweepSummary — distribution of `ln PR` across replications.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepSummary {
    log_ratios: Array1<f64>,
    mean_log_ratio: f64,
    median_log_ratio: f64,
    fraction_favoring_richer: f64,
}

impl SweepSummary {
    /// `ln PR` per replication, in replication order.
    pub fn log_ratios(&self) -> &Array1<f64> {
        &self.log_ratios
    }

    pub fn replications(&self) -> usize {
        self.log_ratios.len()
    }

    pub fn mean_log_ratio(&self) -> f64 {
        self.mean_log_ratio
    }

    pub fn median_log_ratio(&self) -> f64 {
        self.median_log_ratio
    }

    /// Share of replications with `PR < 1` (quadratic preferred).
    pub fn fraction_favoring_richer(&self) -> f64 {
        self.fraction_favoring_richer
    }
}

/// posterior_ratio_sweep — repeat a comparison over fresh noise draws.
///
/// Parameters
/// ----------
/// - `estimator`: `&PosteriorRatioEstimator`
///   Comparison applied to every replication.
/// - `truth`: `&[f64]`
///   True polynomial, highest power first.
/// - `x`: `&Array1<f64>`
///   Shared abscissae.
/// - `sigma`: `f64`
///   Noise standard deviation (and the datasets' known `σ`).
/// - `opts`: `&SweepOptions`
///
/// Returns
/// -------
/// `SimResult<SweepSummary>`
///
/// Errors
/// ------
/// - `SimError::EmptyTruth`, `SimError::InvalidNoise` before any draw.
/// - `SimError::Fit(..)` / `SimError::Selection(..)` from the first failing
///   replication.
///
/// Examples
/// --------
/// ```rust
/// # use posterior_ratio::model_selection::{PosteriorRatioEstimator, PosteriorRatioOptions};
/// # use posterior_ratio::simulation::{SweepOptions, posterior_ratio_sweep, uniform_grid};
/// let x = uniform_grid(-5.0, 5.0, 11).unwrap();
/// let est = PosteriorRatioEstimator::new(PosteriorRatioOptions::new(None, 1.0).unwrap());
/// let opts = SweepOptions::new(50, Some(3)).unwrap();
/// let summary = posterior_ratio_sweep(&est, &[0.5, 2.0, 0.0], &x, 0.5, &opts).unwrap();
/// assert_eq!(summary.fraction_favoring_richer(), 1.0);
/// ```
pub fn posterior_ratio_sweep(
    estimator: &PosteriorRatioEstimator, truth: &[f64], x: &Array1<f64>, sigma: f64,
    opts: &SweepOptions,
) -> SimResult<SweepSummary> {
    let noise = noise_distribution(truth, sigma)?;
    let mut master = SimOpts { seed: opts.seed }.rng();

    let mut log_ratios = Vec::with_capacity(opts.replications);
    for _ in 0..opts.replications {
        let mut rng = SimOpts::seeded(master.r#gen::<u64>()).rng();
        let dataset = sample_dataset(truth, x, sigma, &noise, &mut rng)?;
        let comparison = estimator.compare(&dataset)?;
        log_ratios.push(comparison.ratio().log_value());
    }

    Ok(summarize(Array1::from(log_ratios)))
}

// ---- Helper methods ----

fn summarize(log_ratios: Array1<f64>) -> SweepSummary {
    let n = log_ratios.len() as f64;
    let mean_log_ratio = log_ratios.sum() / n;
    let fraction_favoring_richer = log_ratios.iter().filter(|&&l| l < 0.0).count() as f64 / n;

    let mut sorted = log_ratios.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    let median_log_ratio =
        if sorted.len() % 2 == 0 { 0.5 * (sorted[mid - 1] + sorted[mid]) } else { sorted[mid] };

    SweepSummary { log_ratios, mean_log_ratio, median_log_ratio, fraction_favoring_richer }
}
