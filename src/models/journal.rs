use chrono::NaiveDate;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Debit,
    Credit,
    Memo,
}

impl RowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "debet",
            Self::Credit => "kredit",
            Self::Memo => "memo",
        }
    }

    /// Position of the row inside its triplet, used as the row-id suffix.
    pub(crate) fn position(&self) -> u8 {
        match self {
            Self::Debit => 1,
            Self::Credit => 2,
            Self::Memo => 3,
        }
    }
}

impl std::fmt::Display for RowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One line of the General Journal (Jurnal Umum).
///
/// Rows always come in debit/credit/memo triplets sharing `transaction_id`.
/// Only the debit row carries the date; the memo row carries no account and
/// no amounts.
#[derive(Debug, Clone, PartialEq)]
pub struct JournalRow {
    pub row_id: String,
    pub transaction_id: String,
    pub date: Option<NaiveDate>,
    pub account_code: Option<String>,
    pub description: String,
    pub debit_amount: Decimal,
    pub credit_amount: Decimal,
    pub kind: RowKind,
}

impl JournalRow {
    pub(crate) fn new(transaction_id: &str, kind: RowKind, description: String) -> Self {
        Self {
            row_id: format!("{transaction_id}-{}", kind.position()),
            transaction_id: transaction_id.to_string(),
            date: None,
            account_code: None,
            description,
            debit_amount: Decimal::ZERO,
            credit_amount: Decimal::ZERO,
            kind,
        }
    }
}

/// A hand-entered journal transaction: debit `account_code`, credit the
/// counter-narrative, both for `amount`.
#[derive(Debug, Clone, PartialEq)]
pub struct ManualJournal {
    pub date: NaiveDate,
    pub account_code: String,
    pub debit_description: String,
    pub credit_description: String,
    pub amount: Decimal,
}
