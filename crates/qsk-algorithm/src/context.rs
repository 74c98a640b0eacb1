use chrono::NaiveDateTime;

use qsk_benchmark::Benchmark;
use qsk_brokerage::{CashAmount, CashBook, SettlementModel};

/// Per-delivery view the host hands to an algorithm callback.
///
/// Everything an algorithm may touch during `on_data`/`on_end` is reachable
/// from here: the current simulated time, the resolved benchmark provider,
/// the run's cash book, and the settlement capability. The context borrows
/// host state for the duration of a single callback; nothing is retained
/// between deliveries.
pub struct DataContext<'a> {
    time: NaiveDateTime,
    benchmark: &'a dyn Benchmark,
    cash: &'a mut CashBook,
    settlement: &'a mut dyn SettlementModel,
}

impl<'a> DataContext<'a> {
    pub fn new(
        time: NaiveDateTime,
        benchmark: &'a dyn Benchmark,
        cash: &'a mut CashBook,
        settlement: &'a mut dyn SettlementModel,
    ) -> Self {
        Self {
            time,
            benchmark,
            cash,
            settlement,
        }
    }

    /// Current simulated time. Read-only; the host owns clock advancement.
    pub fn time(&self) -> NaiveDateTime {
        self.time
    }

    /// The benchmark provider this run resolved (injected or default).
    pub fn benchmark(&self) -> &dyn Benchmark {
        self.benchmark
    }

    pub fn cash(&self) -> &CashBook {
        self.cash
    }

    /// Route a funds movement through the run's settlement model.
    pub fn apply_funds(&mut self, amount: &CashAmount) {
        self.settlement.apply_funds(self.cash, amount, self.time);
    }

    /// Run a settlement scan as of an explicit simulated timestamp.
    pub fn run_settlement_scan(&mut self, at: NaiveDateTime) {
        self.settlement.scan(self.cash, at);
    }
}
