use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{AuxiliaryEntry, CashEntry, EntryId};

/// A dated book line whose running balance is derived.
pub trait Balanced {
    fn date(&self) -> NaiveDate;
    /// Creation sequence, the tie-break between same-day lines.
    fn sequence(&self) -> EntryId;
    /// Signed effect on the balance in the book's own polarity.
    fn contribution(&self) -> Decimal;
    fn set_balance(&mut self, balance: Decimal);
}

impl Balanced for CashEntry {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn sequence(&self) -> EntryId {
        self.id
    }

    fn contribution(&self) -> Decimal {
        self.signed_amount()
    }

    fn set_balance(&mut self, balance: Decimal) {
        self.balance = balance;
    }
}

impl Balanced for AuxiliaryEntry {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn sequence(&self) -> EntryId {
        self.id
    }

    fn contribution(&self) -> Decimal {
        self.signed_amount()
    }

    fn set_balance(&mut self, balance: Decimal) {
        self.balance = balance;
    }
}

/// Sort by `(date, sequence)` and annotate each line with the running
/// balance up to and including it. Any balance already present is ignored.
pub fn recalculate<T: Balanced>(mut entries: Vec<T>) -> Vec<T> {
    entries.sort_by_key(|e| (e.date(), e.sequence()));
    let mut running = Decimal::ZERO;
    for entry in &mut entries {
        running += entry.contribution();
        entry.set_balance(running);
    }
    entries
}
