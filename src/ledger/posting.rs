use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::config::CashAccount;
use crate::error::{LedgerError, Result};
use crate::models::{JournalRow, ManualJournal, NewCashEntry, RowKind};

/// Journal transaction id: `JU-{MM}{DD}-{NNNN}`.
pub(crate) fn transaction_id(date: NaiveDate, seq: u32) -> String {
    format!("JU-{:02}{:02}-{seq:04}", date.month(), date.day())
}

/// Turn one new cash-book line into its debit/credit/memo triplet.
///
/// A receipt debits the cash account and credits the line's own code; a
/// disbursement does the reverse. When both amounts are set (tolerated
/// for imported rows) the receipt side wins.
pub fn post(entry: &NewCashEntry, cash: &CashAccount, transaction_id: &str) -> Result<[JournalRow; 3]> {
    let (debit, credit) = if entry.receipt_amount > Decimal::ZERO {
        let amount = entry.receipt_amount;
        (
            (cash.code.as_str(), cash.label.as_str(), amount),
            (entry.account_code.as_str(), entry.description.as_str(), amount),
        )
    } else if entry.disbursement_amount > Decimal::ZERO {
        let amount = entry.disbursement_amount;
        (
            (entry.account_code.as_str(), entry.description.as_str(), amount),
            (cash.code.as_str(), cash.label.as_str(), amount),
        )
    } else {
        return Err(LedgerError::InvalidEntry(format!(
            "cannot post '{}' on {}: both amounts are zero",
            entry.description, entry.date
        )));
    };

    let mut debit_row = JournalRow::new(transaction_id, RowKind::Debit, debit.1.to_string());
    debit_row.date = Some(entry.date);
    debit_row.account_code = Some(debit.0.to_string());
    debit_row.debit_amount = debit.2;

    let mut credit_row = JournalRow::new(transaction_id, RowKind::Credit, credit.1.to_string());
    credit_row.account_code = Some(credit.0.to_string());
    credit_row.credit_amount = credit.2;

    let memo_row = JournalRow::new(
        transaction_id,
        RowKind::Memo,
        format!("(Posting Otomatis: {})", entry.description),
    );

    Ok([debit_row, credit_row, memo_row])
}

/// Triplet for a hand-entered journal transaction. The credit row names no
/// account, only its narrative.
pub(crate) fn post_manual(entry: &ManualJournal, transaction_id: &str) -> Result<[JournalRow; 3]> {
    let missing: Vec<&str> = [
        ("account code", entry.account_code.trim()),
        ("debit description", entry.debit_description.trim()),
        ("credit description", entry.credit_description.trim()),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(name, _)| name)
    .collect();
    if !missing.is_empty() {
        return Err(LedgerError::Validation(format!(
            "missing {}",
            missing.join(", ")
        )));
    }
    if entry.amount <= Decimal::ZERO {
        return Err(LedgerError::Validation(format!(
            "amount must be positive, got {}",
            entry.amount
        )));
    }

    let mut debit_row = JournalRow::new(
        transaction_id,
        RowKind::Debit,
        entry.debit_description.trim().to_string(),
    );
    debit_row.date = Some(entry.date);
    debit_row.account_code = Some(entry.account_code.trim().to_string());
    debit_row.debit_amount = entry.amount;

    let mut credit_row = JournalRow::new(
        transaction_id,
        RowKind::Credit,
        entry.credit_description.trim().to_string(),
    );
    credit_row.credit_amount = entry.amount;

    let memo_row = JournalRow::new(
        transaction_id,
        RowKind::Memo,
        format!("(Pencatatan {})", entry.debit_description.trim()),
    );

    Ok([debit_row, credit_row, memo_row])
}
