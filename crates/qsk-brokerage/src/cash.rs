use std::collections::BTreeMap;

/// Cash/price scale: micros (1e-6).
pub const MICROS_SCALE: i64 = 1_000_000;

/// An amount of a single currency, in micros.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CashAmount {
    pub currency: String,
    pub amount_micros: i64,
}

impl CashAmount {
    pub fn new(currency: impl Into<String>, amount_micros: i64) -> Self {
        Self {
            currency: currency.into(),
            amount_micros,
        }
    }

    pub fn usd(amount_micros: i64) -> Self {
        Self::new("USD", amount_micros)
    }
}

/// Per-currency cash balances in micros.
///
/// Keyed by currency code in a `BTreeMap`, so iteration order is stable.
/// Balances may go negative; enforcement of margin/credit rules is not a
/// concern of this harness.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CashBook {
    balances: BTreeMap<String, i64>,
}

impl CashBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance for a currency; unknown currencies read as 0.
    pub fn amount(&self, currency: &str) -> i64 {
        self.balances.get(currency).copied().unwrap_or(0)
    }

    /// Add (or subtract, with a negative delta) to a currency balance.
    pub fn add(&mut self, currency: impl Into<String>, delta_micros: i64) {
        let entry = self.balances.entry(currency.into()).or_insert(0);
        *entry += delta_micros;
    }

    /// Overwrite a currency balance.
    pub fn set(&mut self, currency: impl Into<String>, amount_micros: i64) {
        self.balances.insert(currency.into(), amount_micros);
    }

    pub fn balances(&self) -> &BTreeMap<String, i64> {
        &self.balances
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_currency_reads_zero() {
        let book = CashBook::new();
        assert_eq!(book.amount("USD"), 0);
    }

    #[test]
    fn add_accumulates_and_allows_negative() {
        let mut book = CashBook::new();
        book.add("USD", 10_000 * MICROS_SCALE);
        book.add("USD", -12_000 * MICROS_SCALE);
        assert_eq!(book.amount("USD"), -2_000 * MICROS_SCALE);
    }

    #[test]
    fn set_overwrites() {
        let mut book = CashBook::new();
        book.add("USD", 5);
        book.set("USD", 42);
        assert_eq!(book.amount("USD"), 42);
    }
}
