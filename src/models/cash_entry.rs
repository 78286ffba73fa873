use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::EntryId;
use crate::error::{LedgerError, Result};

/// Whether money comes into the treasury or goes out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Receipt,
    Disbursement,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Receipt => "Penerimaan",
            Self::Disbursement => "Pembayaran",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "penerimaan" | "receipt" | "masuk" => Some(Self::Receipt),
            "pembayaran" | "pengeluaran" | "belanja" | "disbursement" | "keluar" => {
                Some(Self::Disbursement)
            }
            _ => None,
        }
    }

    /// Word that opens a generated narrative.
    pub(crate) fn prefix(&self) -> &'static str {
        match self {
            Self::Receipt => "Penerimaan",
            Self::Disbursement => "Belanja",
        }
    }

    /// Word that introduces the counterparty in a generated narrative.
    pub(crate) fn connector(&self) -> &'static str {
        match self {
            Self::Receipt => "Dari",
            Self::Disbursement => "Kepada",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A General Cash Book (BKU) line as supplied by a caller: no id, no balance.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCashEntry {
    pub date: NaiveDate,
    pub account_code: String,
    pub category: String,
    pub description: String,
    pub receipt_amount: Decimal,
    pub disbursement_amount: Decimal,
}

impl NewCashEntry {
    pub fn receipt(
        date: NaiveDate,
        account_code: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            date,
            account_code: account_code.into(),
            category: category.into(),
            description: description.into(),
            receipt_amount: amount,
            disbursement_amount: Decimal::ZERO,
        }
    }

    pub fn disbursement(
        date: NaiveDate,
        account_code: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            date,
            account_code: account_code.into(),
            category: category.into(),
            description: description.into(),
            receipt_amount: Decimal::ZERO,
            disbursement_amount: amount,
        }
    }

    /// `None` for rows that are neither or both (tolerated from imports only).
    pub fn direction(&self) -> Option<Direction> {
        direction_of(self.receipt_amount, self.disbursement_amount)
    }

    pub fn signed_amount(&self) -> Decimal {
        self.receipt_amount - self.disbursement_amount
    }

    /// Enforces the one-nonzero-amount rule that every normal flow must satisfy.
    pub fn validate(&self) -> Result<()> {
        check_amounts(self.receipt_amount, self.disbursement_amount)
    }
}

/// A committed BKU line. `balance` is owned by the ledger's recalculation.
#[derive(Debug, Clone, PartialEq)]
pub struct CashEntry {
    pub id: EntryId,
    pub date: NaiveDate,
    pub account_code: String,
    pub category: String,
    pub description: String,
    pub receipt_amount: Decimal,
    pub disbursement_amount: Decimal,
    pub(crate) balance: Decimal,
}

impl CashEntry {
    pub(crate) fn from_new(id: EntryId, new: NewCashEntry) -> Self {
        Self {
            id,
            date: new.date,
            account_code: new.account_code,
            category: new.category,
            description: new.description,
            receipt_amount: new.receipt_amount,
            disbursement_amount: new.disbursement_amount,
            balance: Decimal::ZERO,
        }
    }

    pub(crate) fn apply(&mut self, new: NewCashEntry) {
        self.date = new.date;
        self.account_code = new.account_code;
        self.category = new.category;
        self.description = new.description;
        self.receipt_amount = new.receipt_amount;
        self.disbursement_amount = new.disbursement_amount;
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn direction(&self) -> Option<Direction> {
        direction_of(self.receipt_amount, self.disbursement_amount)
    }

    pub fn is_receipt(&self) -> bool {
        self.receipt_amount > Decimal::ZERO
    }

    pub fn is_disbursement(&self) -> bool {
        self.disbursement_amount > Decimal::ZERO
    }

    pub fn signed_amount(&self) -> Decimal {
        self.receipt_amount - self.disbursement_amount
    }

    pub fn to_new(&self) -> NewCashEntry {
        NewCashEntry {
            date: self.date,
            account_code: self.account_code.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
            receipt_amount: self.receipt_amount,
            disbursement_amount: self.disbursement_amount,
        }
    }
}

pub(crate) fn direction_of(inflow: Decimal, outflow: Decimal) -> Option<Direction> {
    match (inflow > Decimal::ZERO, outflow > Decimal::ZERO) {
        (true, false) => Some(Direction::Receipt),
        (false, true) => Some(Direction::Disbursement),
        _ => None,
    }
}

pub(crate) fn check_amounts(inflow: Decimal, outflow: Decimal) -> Result<()> {
    if inflow < Decimal::ZERO || outflow < Decimal::ZERO {
        return Err(LedgerError::InvalidEntry(format!(
            "amounts must not be negative ({inflow} / {outflow})"
        )));
    }
    if direction_of(inflow, outflow).is_none() {
        return Err(LedgerError::InvalidEntry(format!(
            "exactly one of the two amounts must be nonzero ({inflow} / {outflow})"
        )));
    }
    Ok(())
}
