//! qsk-brokerage
//!
//! Brokerage behavior as a capability configuration object.
//!
//! There is no model subclassing here: a [`BrokerageModel`] is a plain
//! struct whose slots hold the capabilities a run may override. The host
//! reads the slots directly:
//!
//! - `benchmark`: optional injected [`Benchmark`] provider. When absent the
//!   host falls back to its default close-tracking provider.
//! - `settlement`: a [`SettlementModel`]; defaults to
//!   [`ImmediateSettlement`].
//! - `account_currency`: seeds the run's cash book; defaults to `"USD"`.
//!
//! Anything a brokerage would also model (margin, fees, order filtering)
//! simply has no slot; the default behavior is "nothing".

mod cash;
mod settlement;

pub use cash::{CashAmount, CashBook, MICROS_SCALE};
pub use settlement::{ImmediateSettlement, SettlementModel};

use std::sync::Arc;

use qsk_benchmark::Benchmark;

/// Capability set consulted by the simulation host.
pub struct BrokerageModel {
    account_currency: String,
    benchmark: Option<Arc<dyn Benchmark>>,
    settlement: Box<dyn SettlementModel>,
}

impl Default for BrokerageModel {
    fn default() -> Self {
        Self {
            account_currency: "USD".to_string(),
            benchmark: None,
            settlement: Box::new(ImmediateSettlement),
        }
    }
}

impl BrokerageModel {
    pub fn builder() -> BrokerageModelBuilder {
        BrokerageModelBuilder::default()
    }

    pub fn account_currency(&self) -> &str {
        &self.account_currency
    }

    /// The injected benchmark provider, if any.
    pub fn benchmark(&self) -> Option<Arc<dyn Benchmark>> {
        self.benchmark.clone()
    }

    pub fn settlement_mut(&mut self) -> &mut dyn SettlementModel {
        self.settlement.as_mut()
    }
}

/// Builder for [`BrokerageModel`]; unset slots keep base defaults.
#[derive(Default)]
pub struct BrokerageModelBuilder {
    account_currency: Option<String>,
    benchmark: Option<Arc<dyn Benchmark>>,
    settlement: Option<Box<dyn SettlementModel>>,
}

impl BrokerageModelBuilder {
    pub fn account_currency(mut self, currency: impl Into<String>) -> Self {
        self.account_currency = Some(currency.into());
        self
    }

    /// Inject a benchmark provider the host must use instead of its default.
    pub fn benchmark(mut self, provider: Arc<dyn Benchmark>) -> Self {
        self.benchmark = Some(provider);
        self
    }

    /// Inject a settlement model replacing [`ImmediateSettlement`].
    pub fn settlement(mut self, model: Box<dyn SettlementModel>) -> Self {
        self.settlement = Some(model);
        self
    }

    pub fn build(self) -> BrokerageModel {
        BrokerageModel {
            account_currency: self.account_currency.unwrap_or_else(|| "USD".to_string()),
            benchmark: self.benchmark,
            settlement: self.settlement.unwrap_or_else(|| Box::new(ImmediateSettlement)),
        }
    }
}
