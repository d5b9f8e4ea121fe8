//! simulation — synthetic datasets and Monte Carlo sweeps.
//!
//! Purpose
//! -------
//! Produce noisy observations of a known polynomial and study how the
//! posterior ratio behaves over repeated noise realisations.
//!
//! Key behaviors
//! -------------
//! - [`uniform_grid`] and [`simulate_dataset`] for single datasets.
//! - [`posterior_ratio_sweep`] for seeded, sequential Monte Carlo sweeps
//!   summarised by [`SweepSummary`].
//!
//! Conventions
//! -----------
//! - Truth polynomials use the same highest-power-first ordering as fitted
//!   coefficients.
//! - Failures are reported through [`SimError`] / [`SimResult`].

pub mod errors;
pub mod sweep;
pub mod synthetic;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::errors::{SimError, SimResult};
pub use self::sweep::{SweepOptions, SweepSummary, posterior_ratio_sweep};
pub use self::synthetic::{SimOpts, simulate_dataset, uniform_grid};
