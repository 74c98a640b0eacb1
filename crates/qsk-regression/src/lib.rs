//! qsk-regression
//!
//! Regression algorithms exercising the host's capability-injection
//! surface. Each one configures a window, subscriptions, and a brokerage
//! model carrying the capability under test, then asserts per delivery
//! that the host actually honored it. A failed assertion aborts the run.

mod benchmark_override;
mod settlement_override;

pub use benchmark_override::{
    BenchmarkOverrideCheck, DayParityBenchmark, BENCHMARK_OVERRIDE_CHECK,
};
pub use settlement_override::{
    DeferredRefundSettlement, SettlementOverrideCheck, SETTLEMENT_OVERRIDE_CHECK,
};

use qsk_algorithm::{AlgorithmMeta, AlgorithmRegistry};

/// Registry of all shipped regression algorithms, in a stable order.
pub fn registry() -> AlgorithmRegistry {
    let mut reg = AlgorithmRegistry::new();
    reg.register(
        AlgorithmMeta::new(
            BENCHMARK_OVERRIDE_CHECK,
            "1.0.0",
            "Verifies the host evaluates an injected benchmark provider",
        ),
        || Box::new(BenchmarkOverrideCheck::new()),
    )
    .expect("builtin registration");
    reg.register(
        AlgorithmMeta::new(
            SETTLEMENT_OVERRIDE_CHECK,
            "1.0.0",
            "Verifies the host routes funds through an injected settlement model",
        ),
        || Box::new(SettlementOverrideCheck),
    )
    .expect("builtin registration");
    reg
}
