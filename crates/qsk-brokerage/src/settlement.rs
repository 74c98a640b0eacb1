use chrono::NaiveDateTime;

use crate::cash::{CashAmount, CashBook};

/// Settlement behavior for funds movements during a simulated run.
///
/// The host owns the cash book and hands it in on every call; models keep
/// only whatever bookkeeping they need between calls (hence `&mut self`).
/// `scan` gives a model the chance to apply deferred movements for a given
/// simulated timestamp.
pub trait SettlementModel: Send {
    /// Apply a funds movement at the given simulated time.
    fn apply_funds(&mut self, book: &mut CashBook, amount: &CashAmount, at: NaiveDateTime);

    /// Re-examine pending settlement state at the given simulated time.
    fn scan(&mut self, book: &mut CashBook, at: NaiveDateTime);
}

/// Base settlement model: funds apply immediately, nothing is deferred.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImmediateSettlement;

impl SettlementModel for ImmediateSettlement {
    fn apply_funds(&mut self, book: &mut CashBook, amount: &CashAmount, _at: NaiveDateTime) {
        book.add(amount.currency.clone(), amount.amount_micros);
    }

    fn scan(&mut self, _book: &mut CashBook, _at: NaiveDateTime) {}
}
