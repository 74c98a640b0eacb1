use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Granularity at which simulated market data is delivered.
///
/// The host is daily-only: one delivery per simulated trading day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    Daily,
}

/// One simulated trading day of OHLCV for one symbol. Prices in micros.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBar {
    pub symbol: String,
    pub date: NaiveDate,
    pub open_micros: i64,
    pub high_micros: i64,
    pub low_micros: i64,
    pub close_micros: i64,
    pub volume: i64,
    /// Incomplete bars are rejected by the host (anti-lookahead).
    pub is_complete: bool,
}

impl DailyBar {
    pub fn new(
        symbol: impl Into<String>,
        date: NaiveDate,
        open_micros: i64,
        high_micros: i64,
        low_micros: i64,
        close_micros: i64,
        volume: i64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            date,
            open_micros,
            high_micros,
            low_micros,
            close_micros,
            volume,
            is_complete: true,
        }
    }
}

/// One data delivery: the simulated timestamp plus that day's bars.
///
/// Bars are keyed by symbol in a `BTreeMap` for stable iteration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slice {
    pub time: NaiveDateTime,
    pub bars: BTreeMap<String, DailyBar>,
}

impl Slice {
    pub fn new(time: NaiveDateTime, bars: BTreeMap<String, DailyBar>) -> Self {
        Self { time, bars }
    }

    pub fn get(&self, symbol: &str) -> Option<&DailyBar> {
        self.bars.get(symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.bars.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}
