//! qsk-algorithm
//!
//! The plugin contract between the simulation host and user algorithms.
//!
//! The lifecycle is imposed by the host: one `initialize` call where the
//! algorithm configures its window, subscriptions, and brokerage model,
//! then one synchronous `on_data` call per simulated trading day, then
//! `on_end` after the final delivery. An algorithm signals a fatal failure
//! by returning [`AlgorithmAbort`]; the host terminates the run and
//! surfaces the abort, nothing downstream catches it.

mod context;
mod registry;
mod settings;
mod types;

pub use context::DataContext;
pub use registry::{AlgorithmFactory, AlgorithmMeta, AlgorithmRegistry, RegistryError};
pub use settings::{
    AlgorithmSettings, InitContext, SetupError, Subscription, DEFAULT_CASH_MICROS,
};
pub use types::{DailyBar, Resolution, Slice};

/// Fatal abort raised by an algorithm callback.
///
/// Not recoverable: the host terminates the run and surfaces the message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlgorithmAbort {
    pub message: String,
}

impl AlgorithmAbort {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for AlgorithmAbort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AlgorithmAbort {}

/// A host-loaded algorithm.
pub trait Algorithm: Send {
    /// Stable identifier used by the registry and in run reports.
    fn name(&self) -> &'static str;

    /// One-time configuration; called before any data is delivered.
    fn initialize(&mut self, init: &mut InitContext);

    /// One delivery of simulated market data.
    fn on_data(&mut self, ctx: &mut DataContext<'_>, slice: &Slice) -> Result<(), AlgorithmAbort>;

    /// Called once after the final delivery.
    fn on_end(&mut self, _ctx: &mut DataContext<'_>) -> Result<(), AlgorithmAbort> {
        Ok(())
    }
}
