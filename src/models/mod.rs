mod account_code;
mod auxiliary_entry;
mod budget;
mod cash_entry;
mod journal;
mod narrative;

pub use account_code::{clean_code, describe_code, CodeSuggestion, REFERENCE_CODES};
pub(crate) use account_code::HISTORICAL_CODE_LABEL;
pub use auxiliary_entry::{AuxiliaryEntry, NewAuxiliaryEntry};
pub use budget::{BudgetItem, ClassGroup, Classification};
pub use cash_entry::{CashEntry, Direction, NewCashEntry};
pub use journal::{JournalRow, ManualJournal, RowKind};
pub use narrative::{describe, parse_description};

/// Store-assigned identifier. Monotonic per ledger, never reused.
pub type EntryId = i64;
