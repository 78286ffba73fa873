use rust_decimal::Decimal;
use tracing::warn;

use crate::models::{AuxiliaryEntry, CashEntry};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReconciliationSummary {
    pub opening_balance: Decimal,
    pub total_receipts: Decimal,
    pub total_disbursements: Decimal,
    /// Opening balance plus receipts.
    pub managed_funds: Decimal,
    pub book_balance: Decimal,
    pub auxiliary_balance: Decimal,
    /// Cash book and auxiliary book end on the same balance.
    pub books_agree: bool,
    pub physical_cash: Decimal,
    pub physical_bank: Decimal,
    pub physical_total: Decimal,
    /// Book balance minus counted money. Nonzero is a finding, not an error.
    pub discrepancy: Decimal,
}

/// Cross-check the books against physically counted cash and bank money.
/// Both slices are expected in balance order, as the ledger keeps them.
pub fn reconcile(
    cash: &[CashEntry],
    auxiliary: &[AuxiliaryEntry],
    physical_cash: Decimal,
    physical_bank: Decimal,
) -> ReconciliationSummary {
    let opening_balance = cash
        .first()
        .map(|e| e.balance() - e.signed_amount())
        .unwrap_or_default();
    let total_receipts: Decimal = cash.iter().map(|e| e.receipt_amount).sum();
    let total_disbursements: Decimal = cash.iter().map(|e| e.disbursement_amount).sum();
    let book_balance = cash.last().map(CashEntry::balance).unwrap_or_default();
    let auxiliary_balance = auxiliary
        .last()
        .map(AuxiliaryEntry::balance)
        .unwrap_or_default();
    let physical_total = physical_cash + physical_bank;

    let books_agree = book_balance == auxiliary_balance;
    if !books_agree {
        warn!(
            book = %book_balance,
            auxiliary = %auxiliary_balance,
            "cash book and auxiliary book disagree"
        );
    }

    ReconciliationSummary {
        opening_balance,
        total_receipts,
        total_disbursements,
        managed_funds: opening_balance + total_receipts,
        book_balance,
        auxiliary_balance,
        books_agree,
        physical_cash,
        physical_bank,
        physical_total,
        discrepancy: book_balance - physical_total,
    }
}
