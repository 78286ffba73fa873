//! Cash bookkeeping for a desa adat treasury: the general cash book (BKU),
//! the auxiliary cash book (BKP), the general journal, and the budget,
//! kept consistent by automatic posting and balance recalculation.

pub mod commit;
pub mod config;
pub mod error;
pub mod format;
pub mod import;
pub mod ledger;
pub mod models;
pub mod report;

pub use commit::{CommitFlow, CommitState};
pub use config::{CashAccount, LedgerConfig, UnbudgetedPolicy};
pub use error::{Book, LedgerError, Result};
pub use ledger::{Ledger, ReplaceJournal};
