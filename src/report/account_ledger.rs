use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::JournalRow;

/// One movement on a Buku Besar (per-account ledger) page.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountLedgerLine {
    pub date: Option<NaiveDate>,
    pub transaction_id: String,
    pub description: String,
    pub debit: Decimal,
    pub credit: Decimal,
    pub balance: Decimal,
}

/// Liability, equity and income codes (2.x, 3.x, 4.x) grow on the credit side.
pub fn is_credit_normal(code: &str) -> bool {
    matches!(code.trim().chars().next(), Some('2' | '3' | '4'))
}

/// Every journal movement on `code`, ordered by transaction date and then
/// by where the transaction starts in the journal, with a running balance
/// in the account's normal direction.
pub fn account_ledger(journal: &[JournalRow], code: &str) -> Vec<AccountLedgerLine> {
    let code = code.trim();
    let dates: HashMap<&str, NaiveDate> = journal
        .iter()
        .filter_map(|r| r.date.map(|d| (r.transaction_id.as_str(), d)))
        .collect();
    let mut starts: HashMap<&str, usize> = HashMap::new();
    for (pos, r) in journal.iter().enumerate() {
        starts.entry(r.transaction_id.as_str()).or_insert(pos);
    }
    let start = |id: &str| starts.get(id).copied().unwrap_or(usize::MAX);

    let mut lines: Vec<AccountLedgerLine> = journal
        .iter()
        .filter(|r| r.account_code.as_deref().map(str::trim) == Some(code))
        .map(|r| AccountLedgerLine {
            date: r.date.or_else(|| dates.get(r.transaction_id.as_str()).copied()),
            transaction_id: r.transaction_id.clone(),
            description: r.description.clone(),
            debit: r.debit_amount,
            credit: r.credit_amount,
            balance: Decimal::ZERO,
        })
        .collect();
    lines.sort_by_key(|line| (line.date, start(line.transaction_id.as_str())));

    let credit_normal = is_credit_normal(code);
    let mut running = Decimal::ZERO;
    for line in &mut lines {
        running += if credit_normal {
            line.credit - line.debit
        } else {
            line.debit - line.credit
        };
        line.balance = running;
    }
    lines
}
