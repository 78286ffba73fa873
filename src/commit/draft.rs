use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{LedgerError, Result};
use crate::models::{clean_code, describe, Direction, NewAuxiliaryEntry, NewCashEntry};

/// What the treasurer fills in before any confirmation step.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub date: NaiveDate,
    /// Plain code or a picker selection like `"5.1.2.01 - Belanja ATK"`.
    pub account_code: String,
    pub category: String,
    /// Short purpose text; the full narrative is generated from it.
    pub purpose: String,
    pub amount: Decimal,
    pub direction: Direction,
    pub counterparty: String,
}

impl TransactionDraft {
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = [
            ("account code", clean_code(&self.account_code)),
            ("category", self.category.trim()),
            ("description", self.purpose.trim()),
            ("counterparty", self.counterparty.trim()),
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
        if self.amount <= Decimal::ZERO {
            return Err(LedgerError::Validation(format!(
                "amount must be positive, got {}",
                self.amount
            )));
        }
        Ok(())
    }
}

/// A validated draft waiting for its Kwitansi or Nota. Never visible in
/// the ledger until confirmed.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingTransaction {
    pub date: NaiveDate,
    pub account_code: String,
    pub category: String,
    pub purpose: String,
    /// Generated cash-book narrative.
    pub description: String,
    pub amount: Decimal,
    pub direction: Direction,
    pub counterparty: String,
}

impl PendingTransaction {
    pub(crate) fn from_draft(draft: TransactionDraft) -> Self {
        let description = describe(draft.direction, &draft.purpose, &draft.counterparty);
        Self {
            date: draft.date,
            account_code: clean_code(&draft.account_code).to_string(),
            category: draft.category.trim().to_string(),
            purpose: draft.purpose.trim().to_string(),
            description,
            amount: draft.amount,
            direction: draft.direction,
            counterparty: draft.counterparty.trim().to_string(),
        }
    }

    pub fn to_cash_entry(&self) -> NewCashEntry {
        match self.direction {
            Direction::Receipt => NewCashEntry::receipt(
                self.date,
                self.account_code.clone(),
                self.category.clone(),
                self.description.clone(),
                self.amount,
            ),
            Direction::Disbursement => NewCashEntry::disbursement(
                self.date,
                self.account_code.clone(),
                self.category.clone(),
                self.description.clone(),
                self.amount,
            ),
        }
    }
}

/// Kwitansi details collected for a pending receipt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReceiptConfirmation {
    /// "Untuk pembayaran" text; the draft's purpose when `None`.
    pub purpose: Option<String>,
    /// Generated as `KW-NNNN` when `None`.
    pub voucher_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotaLine {
    pub name: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
}

impl NotaLine {
    pub fn new(name: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit_price,
        }
    }

    pub fn total(&self) -> Decimal {
        self.quantity * self.unit_price
    }

    /// Lines without a name or with a zero total are ignored on commit.
    pub(crate) fn is_recordable(&self) -> bool {
        !self.name.trim().is_empty() && self.total() > Decimal::ZERO
    }
}

/// Itemized expenditure voucher for a pending disbursement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Nota {
    /// Generated as `NOTA-NNNN` when `None`.
    pub voucher_number: Option<String>,
    pub lines: Vec<NotaLine>,
}

impl Nota {
    /// Sum of the recordable lines, the same lines that reach the
    /// auxiliary book.
    pub fn total(&self) -> Decimal {
        self.lines
            .iter()
            .filter(|line| line.is_recordable())
            .map(NotaLine::total)
            .sum()
    }

    /// One auxiliary credit line per recordable item.
    pub(crate) fn auxiliary_lines(
        &self,
        pending: &PendingTransaction,
        voucher: &str,
    ) -> Vec<NewAuxiliaryEntry> {
        self.lines
            .iter()
            .filter(|line| line.is_recordable())
            .map(|line| {
                NewAuxiliaryEntry::credit(
                    pending.date,
                    voucher,
                    pending.category.clone(),
                    format!(
                        "{} ({} x {})",
                        line.name.trim(),
                        line.quantity.normalize(),
                        line.unit_price.normalize()
                    ),
                    line.total(),
                )
            })
            .collect()
    }

    pub(crate) fn check_lines(&self) -> Result<()> {
        match self
            .lines
            .iter()
            .find(|l| l.quantity < Decimal::ZERO || l.unit_price < Decimal::ZERO)
        {
            Some(line) => Err(LedgerError::Validation(format!(
                "Nota line '{}' has a negative quantity or price",
                line.name
            ))),
            None if !self.lines.iter().any(NotaLine::is_recordable) => Err(
                LedgerError::Validation("Nota needs at least one named line with a positive total".into()),
            ),
            None => Ok(()),
        }
    }
}

/// The receipt voucher produced by a confirmed receipt, ready for printing.
#[derive(Debug, Clone, PartialEq)]
pub struct Kwitansi {
    pub cash_entry_id: crate::models::EntryId,
    pub voucher_number: String,
    pub date: NaiveDate,
    pub received_from: String,
    pub amount: Decimal,
    pub amount_in_words: String,
    pub purpose: String,
}

/// Outcome of a confirmed Nota.
#[derive(Debug, Clone, PartialEq)]
pub struct NotaReceipt {
    pub cash_entry_id: crate::models::EntryId,
    pub voucher_number: String,
    pub paid_to: String,
    pub total: Decimal,
    pub lines_recorded: usize,
}
