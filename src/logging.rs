//! logging — structured terminal logger behind the `obs_slog` feature.
//!
//! Purpose
//! -------
//! Build the non-blocking `slog` terminal logger used when
//! `PosteriorRatioOptions::verbose` is set. Records are formatted by
//! `slog-term` and written from a background thread by `slog-async`, so
//! logging never blocks the numerical code.
//!
//! Conventions
//! -----------
//! - Library code only logs through loggers created here; nothing is
//!   printed when the feature is off or `verbose` is false.
//! - Pending records are flushed when the last clone of the returned
//!   logger is dropped.

use slog::{Drain, Logger, o};

/// Asynchronous full-format terminal logger writing to stderr.
pub fn term_logger() -> Logger {
    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    Logger::root(drain, o!("crate" => env!("CARGO_PKG_NAME")))
}
