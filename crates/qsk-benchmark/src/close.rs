use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};

use crate::Benchmark;

/// Default benchmark: the last known daily close of a single symbol.
///
/// Evaluation at timestamp `t` returns the close of the latest date at or
/// before `t`'s date, never a later one, so replay stays lookahead-free.
/// Before the first known close the value is 0.
#[derive(Clone, Debug, Default)]
pub struct ClosePriceBenchmark {
    symbol: String,
    closes: BTreeMap<NaiveDate, i64>,
}

impl ClosePriceBenchmark {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            closes: BTreeMap::new(),
        }
    }

    /// Build from a prepared date -> close_micros map.
    pub fn with_closes(symbol: impl Into<String>, closes: BTreeMap<NaiveDate, i64>) -> Self {
        Self {
            symbol: symbol.into(),
            closes,
        }
    }

    /// Record (or overwrite) the close for a date.
    pub fn record_close(&mut self, date: NaiveDate, close_micros: i64) {
        self.closes.insert(date, close_micros);
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }
}

impl Benchmark for ClosePriceBenchmark {
    fn evaluate(&self, at: NaiveDateTime) -> i64 {
        self.closes
            .range(..=at.date())
            .next_back()
            .map(|(_, close)| *close)
            .unwrap_or(0)
    }
}
