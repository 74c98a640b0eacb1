//! qsk-engine
//!
//! Deterministic daily simulation host.
//!
//! Pipeline: CLOCK -> SLICE -> ALGORITHM -> SAMPLE
//!
//! - Deterministic replay (same bars + algorithm => identical report)
//! - No lookahead (incomplete bars rejected)
//! - Single-threaded: the algorithm runs synchronously inside the loop
//! - Benchmark resolution honors the brokerage model's injected provider,
//!   falling back to the close-tracking default
//! - Weekday calendar; non-trading and no-data days are skipped

mod calendar;
mod data;
mod engine;

pub use calendar::TradingCalendar;
pub use data::{load_csv_file, parse_csv_bars, BarSet, LoadError};
pub use engine::{RunReport, SimEngine, SimError};
