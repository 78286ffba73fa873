use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::EntryId;

/// Which collection an identifier was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Book {
    Cash,
    Auxiliary,
    Journal,
    Budget,
}

impl Book {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "BKU",
            Self::Auxiliary => "BKP",
            Self::Journal => "Jurnal Umum",
            Self::Budget => "Anggaran",
        }
    }
}

impl std::fmt::Display for Book {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    /// A draft is missing a required field or carries a non-positive amount.
    #[error("Validation failed: {0}")]
    Validation(String),
    /// Nota line items do not add up to the pending disbursement.
    /// `difference` is `expected - actual`.
    #[error("Nota total {actual} does not match pending amount {expected} (difference {difference})")]
    ReconciliationMismatch {
        expected: Decimal,
        actual: Decimal,
        difference: Decimal,
    },
    /// Posting contract violation, e.g. both amounts zero.
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),
    #[error("Import failed after {imported} row(s), {skipped} skipped: {reason}")]
    ImportParse {
        imported: usize,
        skipped: usize,
        reason: String,
    },
    #[error("{book} entry not found: {id}")]
    NotFound { book: Book, id: String },
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl LedgerError {
    pub(crate) fn not_found(book: Book, id: EntryId) -> Self {
        Self::NotFound {
            book,
            id: id.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
