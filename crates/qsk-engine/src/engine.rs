use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use qsk_algorithm::{
    Algorithm, AlgorithmSettings, DataContext, InitContext, SetupError, Slice,
};
use qsk_benchmark::{Benchmark, ClosePriceBenchmark};
use qsk_brokerage::CashBook;

use crate::calendar::TradingCalendar;
use crate::data::BarSet;

/// Simulation error variants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimError {
    /// The algorithm's initialization was rejected (forwarded).
    Setup(SetupError),
    /// A bar was flagged incomplete (anti-lookahead).
    IncompleteBar { symbol: String, date: NaiveDate },
    /// The algorithm raised a fatal abort. Terminates the run immediately;
    /// nothing in the host recovers from it.
    AlgorithmAbort {
        algorithm: String,
        at: NaiveDateTime,
        message: String,
    },
}

impl From<SetupError> for SimError {
    fn from(e: SetupError) -> Self {
        SimError::Setup(e)
    }
}

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimError::Setup(e) => write!(f, "initialization rejected: {e}"),
            SimError::IncompleteBar { symbol, date } => {
                write!(f, "incomplete bar: {symbol} @ {date}")
            }
            SimError::AlgorithmAbort {
                algorithm,
                at,
                message,
            } => write!(f, "algorithm '{algorithm}' aborted at {at}: {message}"),
        }
    }
}

impl std::error::Error for SimError {}

/// Report produced by a completed run.
///
/// Deterministic: same bars + same algorithm => identical report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub algorithm: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Number of slices actually delivered (non-trading days are skipped).
    pub days_delivered: u32,
    /// Benchmark value sampled at each delivered timestamp.
    pub benchmark_curve: Vec<(NaiveDate, i64)>,
    /// Final cash balances by currency, in micros.
    pub final_cash: BTreeMap<String, i64>,
}

/// The simulation host: drives one algorithm across a daily window.
///
/// Pipeline per trading day: CLOCK -> SLICE -> ALGORITHM -> SAMPLE.
/// Single-threaded and synchronous; the algorithm is called in the loop's
/// own call stack and the clock only advances between deliveries.
pub struct SimEngine {
    calendar: TradingCalendar,
    data: BarSet,
}

impl SimEngine {
    pub fn new(data: BarSet) -> Self {
        Self {
            calendar: TradingCalendar::Weekdays,
            data,
        }
    }

    pub fn with_calendar(data: BarSet, calendar: TradingCalendar) -> Self {
        Self { calendar, data }
    }

    /// Run the algorithm across its configured window.
    ///
    /// 1. `initialize` is called exactly once and its settings validated.
    /// 2. The benchmark is resolved: the brokerage model's injected
    ///    provider when present, otherwise the default close-tracking
    ///    provider over the primary subscription.
    /// 3. The cash book is seeded with starting cash.
    /// 4. The clock steps through trading days; each day with data for at
    ///    least one subscription becomes one `on_data` delivery. Incomplete
    ///    bars abort the run.
    /// 5. The benchmark is sampled at every delivered timestamp.
    /// 6. `on_end` runs after the final delivery.
    pub fn run(&self, algorithm: &mut dyn Algorithm) -> Result<RunReport, SimError> {
        let name = algorithm.name().to_string();

        let mut init = InitContext::new();
        algorithm.initialize(&mut init);

        let settings = init.into_settings()?;
        let primary = settings.primary_symbol().to_string();
        let AlgorithmSettings {
            start_date,
            end_date,
            cash_micros,
            subscriptions,
            mut brokerage,
        } = settings;

        let benchmark: Arc<dyn Benchmark> = match brokerage.benchmark() {
            Some(injected) => injected,
            None => Arc::new(ClosePriceBenchmark::with_closes(
                primary.clone(),
                self.data.closes_for(&primary),
            )),
        };

        let mut cash = CashBook::new();
        cash.add(brokerage.account_currency().to_string(), cash_micros);

        let mut days_delivered = 0u32;
        let mut benchmark_curve: Vec<(NaiveDate, i64)> = Vec::new();

        for date in self.calendar.trading_days(start_date, end_date) {
            let Some(day_bars) = self.data.bars_on(date) else {
                continue;
            };

            let mut bars = BTreeMap::new();
            for sub in &subscriptions {
                if let Some(bar) = day_bars.get(&sub.symbol) {
                    if !bar.is_complete {
                        return Err(SimError::IncompleteBar {
                            symbol: sub.symbol.clone(),
                            date,
                        });
                    }
                    bars.insert(sub.symbol.clone(), bar.clone());
                }
            }
            if bars.is_empty() {
                continue;
            }

            let time = date.and_time(NaiveTime::MIN);
            let slice = Slice::new(time, bars);

            let mut ctx = DataContext::new(
                time,
                benchmark.as_ref(),
                &mut cash,
                brokerage.settlement_mut(),
            );
            algorithm
                .on_data(&mut ctx, &slice)
                .map_err(|abort| SimError::AlgorithmAbort {
                    algorithm: name.clone(),
                    at: time,
                    message: abort.message,
                })?;

            benchmark_curve.push((date, benchmark.evaluate(time)));
            days_delivered += 1;
        }

        let end_time = end_date.and_time(NaiveTime::MIN);
        let mut ctx = DataContext::new(
            end_time,
            benchmark.as_ref(),
            &mut cash,
            brokerage.settlement_mut(),
        );
        algorithm
            .on_end(&mut ctx)
            .map_err(|abort| SimError::AlgorithmAbort {
                algorithm: name.clone(),
                at: end_time,
                message: abort.message,
            })?;

        Ok(RunReport {
            algorithm: name,
            start_date,
            end_date,
            days_delivered,
            benchmark_curve,
            final_cash: cash.balances().clone(),
        })
    }
}
