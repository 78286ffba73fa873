use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::cash_entry::{check_amounts, direction_of, Direction};
use super::EntryId;
use crate::error::Result;

/// An Auxiliary Cash Book (BKP) line as supplied by a caller.
/// Debit is money in, credit is money out.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuxiliaryEntry {
    pub date: NaiveDate,
    pub voucher_number: String,
    pub category: String,
    pub description: String,
    pub debit_amount: Decimal,
    pub credit_amount: Decimal,
}

impl NewAuxiliaryEntry {
    pub fn debit(
        date: NaiveDate,
        voucher_number: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            date,
            voucher_number: voucher_number.into(),
            category: category.into(),
            description: description.into(),
            debit_amount: amount,
            credit_amount: Decimal::ZERO,
        }
    }

    pub fn credit(
        date: NaiveDate,
        voucher_number: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            date,
            voucher_number: voucher_number.into(),
            category: category.into(),
            description: description.into(),
            debit_amount: Decimal::ZERO,
            credit_amount: amount,
        }
    }

    pub fn signed_amount(&self) -> Decimal {
        self.debit_amount - self.credit_amount
    }

    pub fn validate(&self) -> Result<()> {
        check_amounts(self.debit_amount, self.credit_amount)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuxiliaryEntry {
    pub id: EntryId,
    pub date: NaiveDate,
    pub voucher_number: String,
    pub category: String,
    pub description: String,
    pub debit_amount: Decimal,
    pub credit_amount: Decimal,
    pub(crate) balance: Decimal,
}

impl AuxiliaryEntry {
    pub(crate) fn from_new(id: EntryId, new: NewAuxiliaryEntry) -> Self {
        Self {
            id,
            date: new.date,
            voucher_number: new.voucher_number,
            category: new.category,
            description: new.description,
            debit_amount: new.debit_amount,
            credit_amount: new.credit_amount,
            balance: Decimal::ZERO,
        }
    }

    pub(crate) fn apply(&mut self, new: NewAuxiliaryEntry) {
        self.date = new.date;
        self.voucher_number = new.voucher_number;
        self.category = new.category;
        self.description = new.description;
        self.debit_amount = new.debit_amount;
        self.credit_amount = new.credit_amount;
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn direction(&self) -> Option<Direction> {
        direction_of(self.debit_amount, self.credit_amount)
    }

    pub fn signed_amount(&self) -> Decimal {
        self.debit_amount - self.credit_amount
    }

    pub fn to_new(&self) -> NewAuxiliaryEntry {
        NewAuxiliaryEntry {
            date: self.date,
            voucher_number: self.voucher_number.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
            debit_amount: self.debit_amount,
            credit_amount: self.credit_amount,
        }
    }
}
