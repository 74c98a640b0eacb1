//! qsk-benchmark
//!
//! Benchmark evaluation capability.
//!
//! A benchmark maps a simulated timestamp to a reference value the rest of
//! the harness compares against. Providers are pure: no IO, no wall-clock,
//! no hidden state. The host consults exactly one provider per run: either
//! one injected through the brokerage model, or [`ClosePriceBenchmark`],
//! the default that tracks a subscribed symbol's daily closes.

mod close;

pub use close::ClosePriceBenchmark;

use chrono::NaiveDateTime;

/// A benchmark evaluator.
///
/// `evaluate` must be a pure function of `at`: calling it twice with the
/// same timestamp yields the same value. There are no error cases; a
/// provider that has no opinion for a timestamp returns a sentinel (the
/// default provider returns 0 before its first close).
pub trait Benchmark: Send + Sync {
    /// Benchmark value at the given simulated timestamp.
    ///
    /// Values are plain `i64`; the default provider reports price micros,
    /// synthetic providers may report whatever scale their consumers expect.
    fn evaluate(&self, at: NaiveDateTime) -> i64;
}
