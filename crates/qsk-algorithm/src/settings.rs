use chrono::NaiveDate;

use qsk_brokerage::BrokerageModel;

use crate::types::Resolution;

/// Default starting cash: 100k USD in micros.
pub const DEFAULT_CASH_MICROS: i64 = 100_000_000_000;

/// A symbol subscription at a delivery resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subscription {
    pub symbol: String,
    pub resolution: Resolution,
}

/// What an algorithm may configure during its one-time initialization call.
///
/// Dates are taken as raw (year, month, day) and validated when the host
/// converts the context into [`AlgorithmSettings`], so algorithm code never
/// has to handle a date-construction failure itself.
pub struct InitContext {
    start_date: Option<(i32, u32, u32)>,
    end_date: Option<(i32, u32, u32)>,
    cash_micros: i64,
    subscriptions: Vec<Subscription>,
    brokerage: BrokerageModel,
}

impl Default for InitContext {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            cash_micros: DEFAULT_CASH_MICROS,
            subscriptions: Vec::new(),
            brokerage: BrokerageModel::default(),
        }
    }
}

impl InitContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_start_date(&mut self, year: i32, month: u32, day: u32) {
        self.start_date = Some((year, month, day));
    }

    pub fn set_end_date(&mut self, year: i32, month: u32, day: u32) {
        self.end_date = Some((year, month, day));
    }

    pub fn set_cash_micros(&mut self, cash_micros: i64) {
        self.cash_micros = cash_micros;
    }

    /// Subscribe a symbol for data delivery.
    pub fn add_equity(&mut self, symbol: impl Into<String>, resolution: Resolution) {
        self.subscriptions.push(Subscription {
            symbol: symbol.into(),
            resolution,
        });
    }

    /// Replace the brokerage model for this run.
    pub fn set_brokerage_model(&mut self, model: BrokerageModel) {
        self.brokerage = model;
    }

    /// Validate and seal the configuration.
    pub fn into_settings(self) -> Result<AlgorithmSettings, SetupError> {
        let start = self.start_date.ok_or(SetupError::MissingStartDate)?;
        let end = self.end_date.ok_or(SetupError::MissingEndDate)?;

        let start_date = resolve_date(start)?;
        let end_date = resolve_date(end)?;

        if end_date < start_date {
            return Err(SetupError::WindowInverted {
                start: start_date,
                end: end_date,
            });
        }
        if self.subscriptions.is_empty() {
            return Err(SetupError::NoSubscriptions);
        }

        Ok(AlgorithmSettings {
            start_date,
            end_date,
            cash_micros: self.cash_micros,
            subscriptions: self.subscriptions,
            brokerage: self.brokerage,
        })
    }
}

fn resolve_date((year, month, day): (i32, u32, u32)) -> Result<NaiveDate, SetupError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or(SetupError::InvalidDate { year, month, day })
}

/// Sealed, validated run configuration produced from [`InitContext`].
pub struct AlgorithmSettings {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub cash_micros: i64,
    pub subscriptions: Vec<Subscription>,
    pub brokerage: BrokerageModel,
}

impl AlgorithmSettings {
    /// The first subscription; the host's default benchmark tracks it.
    pub fn primary_symbol(&self) -> &str {
        &self.subscriptions[0].symbol
    }
}

/// Initialization-time policy errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SetupError {
    MissingStartDate,
    MissingEndDate,
    InvalidDate { year: i32, month: u32, day: u32 },
    WindowInverted { start: NaiveDate, end: NaiveDate },
    NoSubscriptions,
}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupError::MissingStartDate => write!(f, "algorithm did not set a start date"),
            SetupError::MissingEndDate => write!(f, "algorithm did not set an end date"),
            SetupError::InvalidDate { year, month, day } => {
                write!(f, "invalid calendar date: {year:04}-{month:02}-{day:02}")
            }
            SetupError::WindowInverted { start, end } => {
                write!(f, "end date {end} precedes start date {start}")
            }
            SetupError::NoSubscriptions => write!(f, "algorithm subscribed no symbols"),
        }
    }
}

impl std::error::Error for SetupError {}
