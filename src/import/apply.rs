use tracing::{debug, info};

use super::csv_import::{RowError, Sheet};
use super::detect::SheetKind;
use crate::error::{LedgerError, Result};
use crate::ledger::{Ledger, ReplaceJournal};
use crate::models::EntryId;

/// Outcome of an additive import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    /// Every row left out, whatever the reason.
    pub skipped: usize,
    /// Malformed rows only, with their file line.
    pub errors: Vec<RowError>,
}

impl Ledger {
    /// Append every parsed row through the normal entry path. Cash rows are
    /// journal-posted like any new entry; rows the ledger refuses count as
    /// skipped and the rest still go in.
    pub fn import_additive(&mut self, sheet: Sheet) -> ImportSummary {
        let kind = sheet.kind();
        let mut summary = ImportSummary {
            imported: 0,
            skipped: sheet.blank() + sheet.errors().len(),
            errors: sheet.errors().to_vec(),
        };

        let mut tally = |outcome: Result<EntryId>| match outcome {
            Ok(_) => summary.imported += 1,
            Err(e) => {
                debug!(error = %e, "imported row refused");
                summary.skipped += 1;
            }
        };
        match sheet {
            Sheet::Cash(s) => s.rows.into_iter().for_each(|e| tally(self.submit_cash_entry(e))),
            Sheet::Auxiliary(s) => s
                .rows
                .into_iter()
                .for_each(|e| tally(self.submit_auxiliary_entry(e))),
            Sheet::Budget(s) => s
                .rows
                .into_iter()
                .for_each(|item| tally(Ok(self.add_budget_item(item)))),
        }

        info!(
            kind = kind.as_str(),
            imported = summary.imported,
            skipped = summary.skipped,
            "additive import finished"
        );
        summary
    }
}

/// A replace import that has passed validation but not yet touched the
/// ledger. Dropping it abandons the import.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "nothing is replaced until the staged import is confirmed"]
pub struct StagedReplace {
    sheet: Sheet,
}

impl StagedReplace {
    pub fn kind(&self) -> SheetKind {
        self.sheet.kind()
    }

    /// Rows that will replace the book.
    pub fn len(&self) -> usize {
        self.sheet.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheet.is_empty()
    }

    /// Rows without date or description, which the replace leaves out.
    pub fn blank(&self) -> usize {
        self.sheet.blank()
    }

    /// Wipe the target book and insert the staged rows. A cash replace also
    /// regenerates the general journal from the new lines.
    pub fn confirm(self, ledger: &mut Ledger) -> usize {
        let kind = self.kind();
        let stored = match self.sheet {
            Sheet::Cash(s) => ledger.replace_cash_entries(s.rows, ReplaceJournal::Regenerate),
            Sheet::Auxiliary(s) => ledger.replace_auxiliary_entries(s.rows),
            Sheet::Budget(s) => ledger.replace_budget_items(s.rows),
        };
        info!(kind = kind.as_str(), stored, "replace import confirmed");
        stored
    }
}

/// Check a parsed sheet for a destructive import. Any malformed row
/// rejects the whole file, and so does a file with no usable row.
pub fn stage_replace(sheet: Sheet) -> Result<StagedReplace> {
    if sheet.errors().is_empty() && sheet.is_empty() {
        return Err(LedgerError::ImportParse {
            imported: 0,
            skipped: sheet.blank(),
            reason: "no importable rows".into(),
        });
    }
    if let Some(first) = sheet.errors().first() {
        return Err(LedgerError::ImportParse {
            imported: 0,
            skipped: sheet.blank() + sheet.errors().len(),
            reason: format!(
                "{} malformed row(s), first at {first}",
                sheet.errors().len()
            ),
        });
    }
    debug!(kind = sheet.kind().as_str(), rows = sheet.len(), "replace import staged");
    Ok(StagedReplace { sheet })
}
