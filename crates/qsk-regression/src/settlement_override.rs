//! Settlement-override regression.
//!
//! Proves the host routes funds movements through a settlement model
//! injected via the brokerage model. The custom model records the applied
//! amount and refunds it when a scan is run as of 2013-10-06, the day
//! before the simulation window opens.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use qsk_algorithm::{
    Algorithm, AlgorithmAbort, DataContext, InitContext, Resolution, Slice,
};
use qsk_brokerage::{BrokerageModel, CashAmount, CashBook, SettlementModel, MICROS_SCALE};

/// Registry name of [`SettlementOverrideCheck`].
pub const SETTLEMENT_OVERRIDE_CHECK: &str = "settlement_override_check";

const SEED_CASH_MICROS: i64 = 10_000 * MICROS_SCALE;
const APPLIED_MICROS: i64 = 101 * MICROS_SCALE;
const AFTER_APPLY_MICROS: i64 = 10_101 * MICROS_SCALE;

fn refund_trigger() -> NaiveDateTime {
    // The check runs its scan dated the Sunday before the window opens.
    NaiveDate::from_ymd_opt(2013, 10, 6)
        .expect("valid constant date")
        .and_time(NaiveTime::MIN)
}

/// Custom settlement model: funds apply immediately, but a scan dated at
/// the refund trigger claws the recorded amount back.
#[derive(Debug, Default)]
pub struct DeferredRefundSettlement {
    applied: Option<CashAmount>,
}

impl SettlementModel for DeferredRefundSettlement {
    fn apply_funds(&mut self, book: &mut CashBook, amount: &CashAmount, _at: NaiveDateTime) {
        book.add(amount.currency.clone(), amount.amount_micros);
        self.applied = Some(amount.clone());
    }

    fn scan(&mut self, book: &mut CashBook, at: NaiveDateTime) {
        if at == refund_trigger() {
            if let Some(applied) = &self.applied {
                book.add(applied.currency.clone(), -applied.amount_micros);
            }
        }
    }
}

/// Regression algorithm verifying settlement-model injection end to end.
///
/// Seeds 10 000 USD, applies 101 USD through the injected model on the
/// first delivery where the balance still reads its seed value, then at
/// end of run asserts 10 101 USD, scans as of the refund trigger, and
/// asserts the balance is back to 10 000 USD.
#[derive(Default)]
pub struct SettlementOverrideCheck;

impl Algorithm for SettlementOverrideCheck {
    fn name(&self) -> &'static str {
        SETTLEMENT_OVERRIDE_CHECK
    }

    fn initialize(&mut self, init: &mut InitContext) {
        init.set_start_date(2013, 10, 7);
        init.set_end_date(2013, 10, 11);
        init.set_cash_micros(SEED_CASH_MICROS);
        init.add_equity("SPY", Resolution::Daily);
        init.set_brokerage_model(
            BrokerageModel::builder()
                .settlement(Box::new(DeferredRefundSettlement::default()))
                .build(),
        );
    }

    fn on_data(&mut self, ctx: &mut DataContext<'_>, _slice: &Slice) -> Result<(), AlgorithmAbort> {
        if ctx.cash().amount("USD") == SEED_CASH_MICROS {
            ctx.apply_funds(&CashAmount::usd(APPLIED_MICROS));
        }
        Ok(())
    }

    fn on_end(&mut self, ctx: &mut DataContext<'_>) -> Result<(), AlgorithmAbort> {
        let after_apply = ctx.cash().amount("USD");
        if after_apply != AFTER_APPLY_MICROS {
            return Err(AlgorithmAbort::new(format!(
                "expected {AFTER_APPLY_MICROS} USD micros after apply, but was {after_apply}"
            )));
        }

        ctx.run_settlement_scan(refund_trigger());

        let after_scan = ctx.cash().amount("USD");
        if after_scan != SEED_CASH_MICROS {
            return Err(AlgorithmAbort::new(format!(
                "expected {SEED_CASH_MICROS} USD micros after refund scan, but was {after_scan}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_on_other_dates_does_not_refund() {
        let mut model = DeferredRefundSettlement::default();
        let mut book = CashBook::new();

        let t = NaiveDate::from_ymd_opt(2013, 10, 7)
            .unwrap()
            .and_time(NaiveTime::MIN);
        model.apply_funds(&mut book, &CashAmount::usd(APPLIED_MICROS), t);
        assert_eq!(book.amount("USD"), APPLIED_MICROS);

        model.scan(&mut book, t);
        assert_eq!(book.amount("USD"), APPLIED_MICROS);
    }

    #[test]
    fn scan_at_trigger_refunds_recorded_amount() {
        let mut model = DeferredRefundSettlement::default();
        let mut book = CashBook::new();

        let t = NaiveDate::from_ymd_opt(2013, 10, 7)
            .unwrap()
            .and_time(NaiveTime::MIN);
        model.apply_funds(&mut book, &CashAmount::usd(APPLIED_MICROS), t);
        model.scan(&mut book, refund_trigger());
        assert_eq!(book.amount("USD"), 0);
    }

    #[test]
    fn scan_before_any_apply_is_harmless() {
        let mut model = DeferredRefundSettlement::default();
        let mut book = CashBook::new();
        model.scan(&mut book, refund_trigger());
        assert_eq!(book.amount("USD"), 0);
    }
}
