//! Benchmark-override regression.
//!
//! Proves the host consults a benchmark evaluator injected through the
//! brokerage model instead of its default. The injected evaluator derives
//! its value from day-of-month parity; the algorithm recomputes the same
//! expectation on every delivery and aborts the run on any disagreement.

use std::sync::Arc;

use chrono::{Datelike, NaiveDateTime};

use qsk_algorithm::{
    Algorithm, AlgorithmAbort, DataContext, InitContext, Resolution, Slice,
};
use qsk_benchmark::Benchmark;
use qsk_brokerage::BrokerageModel;

/// Registry name of [`BenchmarkOverrideCheck`].
pub const BENCHMARK_OVERRIDE_CHECK: &str = "benchmark_override_check";

/// Expected benchmark value for a simulated timestamp: even day-of-month
/// reads 1, odd reads 2.
fn parity_value(at: NaiveDateTime) -> i64 {
    if at.day() % 2 == 0 {
        1
    } else {
        2
    }
}

/// The custom evaluator under test. Pure and stateless: the value depends
/// only on the timestamp's day-of-month parity.
#[derive(Clone, Copy, Debug, Default)]
pub struct DayParityBenchmark;

impl Benchmark for DayParityBenchmark {
    fn evaluate(&self, at: NaiveDateTime) -> i64 {
        parity_value(at)
    }
}

/// Regression algorithm verifying benchmark-provider injection end to end.
///
/// Window 2013-10-07 through 2013-10-11 (five weekdays, alternating
/// parity), SPY at daily resolution. Each delivery asks the run's
/// benchmark for its value at the current simulated time and aborts with a
/// mismatch message if it differs from the parity expectation.
pub struct BenchmarkOverrideCheck {
    provider: Arc<dyn Benchmark>,
}

impl BenchmarkOverrideCheck {
    pub fn new() -> Self {
        Self {
            provider: Arc::new(DayParityBenchmark),
        }
    }

    /// Inject an arbitrary provider instead of [`DayParityBenchmark`].
    ///
    /// Exists so tests can prove the check fails when the evaluator is
    /// wrong; the stock regression always injects the parity evaluator.
    pub fn with_benchmark(provider: Arc<dyn Benchmark>) -> Self {
        Self { provider }
    }
}

impl Default for BenchmarkOverrideCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl Algorithm for BenchmarkOverrideCheck {
    fn name(&self) -> &'static str {
        BENCHMARK_OVERRIDE_CHECK
    }

    fn initialize(&mut self, init: &mut InitContext) {
        init.set_start_date(2013, 10, 7);
        init.set_end_date(2013, 10, 11);
        init.add_equity("SPY", Resolution::Daily);
        init.set_brokerage_model(
            BrokerageModel::builder()
                .benchmark(self.provider.clone())
                .build(),
        );
    }

    fn on_data(&mut self, ctx: &mut DataContext<'_>, _slice: &Slice) -> Result<(), AlgorithmAbort> {
        let observed = ctx.benchmark().evaluate(ctx.time());
        let expected = parity_value(ctx.time());
        if observed != expected {
            return Err(AlgorithmAbort::new(format!(
                "benchmark should be {expected}, but was {observed}"
            )));
        }
        Ok(())
    }
}
