mod balance;
mod posting;

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::config::LedgerConfig;
use crate::error::{Book, LedgerError, Result};
use crate::models::*;

pub use balance::{recalculate, Balanced};
pub use posting::post;

/// What happens to the General Journal when the cash book is replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplaceJournal {
    /// Wipe the journal and post every replacement line as if it were new.
    #[default]
    Regenerate,
    /// Leave existing journal rows alone.
    Keep,
}

/// The authoritative in-memory books. Every mutation ends with a full
/// balance recalculation of the collection it touched.
#[derive(Debug, Clone)]
pub struct Ledger {
    config: LedgerConfig,
    cash: Vec<CashEntry>,
    auxiliary: Vec<AuxiliaryEntry>,
    journal: Vec<JournalRow>,
    budget: Vec<BudgetItem>,
    last_id: EntryId,
    journal_seq: u32,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    pub fn with_config(config: LedgerConfig) -> Self {
        Self {
            config,
            cash: Vec::new(),
            auxiliary: Vec::new(),
            journal: Vec::new(),
            budget: Vec::new(),
            last_id: 0,
            journal_seq: 0,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Cash-book lines in balance order.
    pub fn cash_entries(&self) -> &[CashEntry] {
        &self.cash
    }

    pub fn auxiliary_entries(&self) -> &[AuxiliaryEntry] {
        &self.auxiliary
    }

    pub fn journal(&self) -> &[JournalRow] {
        &self.journal
    }

    pub fn budget_items(&self) -> &[BudgetItem] {
        &self.budget
    }

    fn next_id(&mut self) -> EntryId {
        self.last_id += 1;
        self.last_id
    }

    /// The id the next created entry will receive.
    pub(crate) fn peek_next_id(&self) -> EntryId {
        self.last_id + 1
    }

    fn next_transaction_id(&mut self, date: chrono::NaiveDate) -> String {
        self.journal_seq += 1;
        posting::transaction_id(date, self.journal_seq)
    }

    fn peek_transaction_id(&self, date: chrono::NaiveDate) -> String {
        posting::transaction_id(date, self.journal_seq + 1)
    }

    // ── Cash book ────────────────────────────────────────────

    pub fn cash_entry(&self, id: EntryId) -> Option<&CashEntry> {
        self.cash.iter().find(|e| e.id == id)
    }

    /// Append a new line and post it to the journal.
    pub fn submit_cash_entry(&mut self, entry: NewCashEntry) -> Result<EntryId> {
        entry.validate()?;
        let rows = post(&entry, &self.config.cash_account, &self.peek_transaction_id(entry.date))?;
        let txn = self.next_transaction_id(entry.date);
        let id = self.next_id();
        debug!(id, txn = %txn, description = %entry.description, "cash entry submitted");
        self.cash.push(CashEntry::from_new(id, entry));
        self.rebalance_cash();
        self.journal.extend(rows);
        Ok(id)
    }

    /// Edit a committed line in place. The journal is not touched.
    pub fn update_cash_entry(&mut self, id: EntryId, entry: NewCashEntry) -> Result<()> {
        entry.validate()?;
        let existing = self
            .cash
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| LedgerError::not_found(Book::Cash, id))?;
        existing.apply(entry);
        debug!(id, "cash entry updated");
        self.rebalance_cash();
        Ok(())
    }

    pub fn delete_cash_entry(&mut self, id: EntryId) -> Result<CashEntry> {
        let pos = self
            .cash
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| LedgerError::not_found(Book::Cash, id))?;
        let removed = self.cash.remove(pos);
        debug!(id, "cash entry deleted");
        self.rebalance_cash();
        Ok(removed)
    }

    /// Case-insensitive match on description or account code.
    pub fn search_cash_entries(&self, term: &str) -> Vec<&CashEntry> {
        let needle = term.trim().to_lowercase();
        self.cash
            .iter()
            .filter(|e| {
                e.description.to_lowercase().contains(&needle)
                    || e.account_code.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Swap the whole cash book for `entries`, bypassing validation so
    /// imported irregular rows survive. Returns the number of lines stored.
    pub fn replace_cash_entries(&mut self, entries: Vec<NewCashEntry>, journal: ReplaceJournal) -> usize {
        let lines: Vec<CashEntry> = entries
            .into_iter()
            .map(|e| {
                let id = self.next_id();
                CashEntry::from_new(id, e)
            })
            .collect();
        self.cash = recalculate(lines);

        if journal == ReplaceJournal::Regenerate {
            self.journal.clear();
            let pending: Vec<NewCashEntry> = self.cash.iter().map(CashEntry::to_new).collect();
            for entry in pending {
                let txn = self.peek_transaction_id(entry.date);
                match post(&entry, &self.config.cash_account, &txn) {
                    Ok(rows) => {
                        self.journal_seq += 1;
                        self.journal.extend(rows);
                    }
                    Err(e) => warn!(description = %entry.description, error = %e, "imported line not posted"),
                }
            }
        }

        info!(count = self.cash.len(), journal = self.journal.len(), "cash book replaced");
        self.cash.len()
    }

    fn rebalance_cash(&mut self) {
        self.cash = recalculate(std::mem::take(&mut self.cash));
    }

    // ── Auxiliary book ───────────────────────────────────────

    pub fn auxiliary_entry(&self, id: EntryId) -> Option<&AuxiliaryEntry> {
        self.auxiliary.iter().find(|e| e.id == id)
    }

    pub fn submit_auxiliary_entry(&mut self, entry: NewAuxiliaryEntry) -> Result<EntryId> {
        entry.validate()?;
        let id = self.next_id();
        debug!(id, voucher = %entry.voucher_number, "auxiliary entry submitted");
        self.auxiliary.push(AuxiliaryEntry::from_new(id, entry));
        self.rebalance_auxiliary();
        Ok(id)
    }

    pub fn update_auxiliary_entry(&mut self, id: EntryId, entry: NewAuxiliaryEntry) -> Result<()> {
        entry.validate()?;
        let existing = self
            .auxiliary
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| LedgerError::not_found(Book::Auxiliary, id))?;
        existing.apply(entry);
        debug!(id, "auxiliary entry updated");
        self.rebalance_auxiliary();
        Ok(())
    }

    pub fn delete_auxiliary_entry(&mut self, id: EntryId) -> Result<AuxiliaryEntry> {
        let pos = self
            .auxiliary
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| LedgerError::not_found(Book::Auxiliary, id))?;
        let removed = self.auxiliary.remove(pos);
        debug!(id, "auxiliary entry deleted");
        self.rebalance_auxiliary();
        Ok(removed)
    }

    /// Case-insensitive match on description, voucher number, or category.
    pub fn search_auxiliary_entries(&self, term: &str) -> Vec<&AuxiliaryEntry> {
        let needle = term.trim().to_lowercase();
        self.auxiliary
            .iter()
            .filter(|e| {
                e.description.to_lowercase().contains(&needle)
                    || e.voucher_number.to_lowercase().contains(&needle)
                    || e.category.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn replace_auxiliary_entries(&mut self, entries: Vec<NewAuxiliaryEntry>) -> usize {
        let lines: Vec<AuxiliaryEntry> = entries
            .into_iter()
            .map(|e| {
                let id = self.next_id();
                AuxiliaryEntry::from_new(id, e)
            })
            .collect();
        self.auxiliary = recalculate(lines);
        info!(count = self.auxiliary.len(), "auxiliary book replaced");
        self.auxiliary.len()
    }

    fn rebalance_auxiliary(&mut self) {
        self.auxiliary = recalculate(std::mem::take(&mut self.auxiliary));
    }

    // ── Commit ───────────────────────────────────────────────

    /// Write one cash line, its auxiliary lines, and its journal posting
    /// together. Everything is checked before the first write, so an error
    /// leaves all three books unchanged.
    pub(crate) fn commit_transaction(
        &mut self,
        cash: NewCashEntry,
        auxiliary: Vec<NewAuxiliaryEntry>,
    ) -> Result<EntryId> {
        cash.validate()?;
        for line in &auxiliary {
            line.validate()?;
        }
        let rows = post(&cash, &self.config.cash_account, &self.peek_transaction_id(cash.date))?;

        let txn = self.next_transaction_id(cash.date);
        let id = self.next_id();
        info!(
            id,
            txn = %txn,
            amount = %cash.signed_amount(),
            auxiliary = auxiliary.len(),
            "transaction committed"
        );
        self.cash.push(CashEntry::from_new(id, cash));
        for line in auxiliary {
            let aux_id = self.next_id();
            self.auxiliary.push(AuxiliaryEntry::from_new(aux_id, line));
        }
        self.journal.extend(rows);
        self.rebalance_cash();
        self.rebalance_auxiliary();
        Ok(id)
    }

    // ── General journal ──────────────────────────────────────

    /// Record a hand-entered triplet. Returns its transaction id.
    pub fn post_manual_journal(&mut self, entry: ManualJournal) -> Result<String> {
        let rows = posting::post_manual(&entry, &self.peek_transaction_id(entry.date))?;
        let txn = self.next_transaction_id(entry.date);
        debug!(txn = %txn, amount = %entry.amount, "manual journal posted");
        self.journal.extend(rows);
        Ok(txn)
    }

    /// Every row of each triplet where any row matches `term` by
    /// transaction id, narrative, or account code.
    pub fn search_journal(&self, term: &str) -> Vec<&JournalRow> {
        let needle = term.trim().to_lowercase();
        let matching: Vec<&str> = self
            .journal
            .iter()
            .filter(|r| {
                r.transaction_id.to_lowercase().contains(&needle)
                    || r.description.to_lowercase().contains(&needle)
                    || r.account_code
                        .as_deref()
                        .is_some_and(|c| c.to_lowercase().contains(&needle))
            })
            .map(|r| r.transaction_id.as_str())
            .collect();
        self.journal
            .iter()
            .filter(|r| matching.contains(&r.transaction_id.as_str()))
            .collect()
    }

    /// Remove a whole triplet. Returns how many rows went.
    pub fn delete_journal_transaction(&mut self, transaction_id: &str) -> Result<usize> {
        let before = self.journal.len();
        self.journal.retain(|r| r.transaction_id != transaction_id);
        let removed = before - self.journal.len();
        if removed == 0 {
            return Err(LedgerError::NotFound {
                book: Book::Journal,
                id: transaction_id.to_string(),
            });
        }
        debug!(txn = transaction_id, removed, "journal transaction deleted");
        Ok(removed)
    }

    // ── Budget ───────────────────────────────────────────────

    pub fn add_budget_item(&mut self, mut item: BudgetItem) -> EntryId {
        let id = self.next_id();
        item.id = Some(id);
        self.fill_default_code(&mut item);
        debug!(id, label = %item.label, "budget item added");
        self.budget.push(item);
        id
    }

    pub fn update_budget_item(&mut self, id: EntryId, mut item: BudgetItem) -> Result<()> {
        self.fill_default_code(&mut item);
        let existing = self
            .budget
            .iter_mut()
            .find(|b| b.id == Some(id))
            .ok_or_else(|| LedgerError::not_found(Book::Budget, id))?;
        item.id = Some(id);
        *existing = item;
        debug!(id, "budget item updated");
        Ok(())
    }

    pub fn remove_budget_item(&mut self, id: EntryId) -> Result<BudgetItem> {
        let pos = self
            .budget
            .iter()
            .position(|b| b.id == Some(id))
            .ok_or_else(|| LedgerError::not_found(Book::Budget, id))?;
        debug!(id, "budget item removed");
        Ok(self.budget.remove(pos))
    }

    pub fn replace_budget_items(&mut self, items: Vec<BudgetItem>) -> usize {
        self.budget.clear();
        for item in items {
            self.add_budget_item(item);
        }
        info!(count = self.budget.len(), "budget replaced");
        self.budget.len()
    }

    pub fn budget_items_in(&self, classification: Classification) -> Vec<&BudgetItem> {
        self.budget
            .iter()
            .filter(|b| b.classification == classification)
            .collect()
    }

    pub fn budget_total(&self, classification: Classification) -> Decimal {
        self.budget_items_in(classification)
            .iter()
            .map(|b| b.amount)
            .sum()
    }

    fn fill_default_code(&self, item: &mut BudgetItem) {
        if item.account_code.trim().is_empty() {
            item.account_code = self.config.default_account_code.clone();
        }
    }

    // ── Lookups ──────────────────────────────────────────────

    /// Reference chart merged with every code already used in the cash
    /// book, sorted by code.
    pub fn available_codes(&self) -> Vec<CodeSuggestion> {
        let mut codes: BTreeMap<String, String> = REFERENCE_CODES
            .iter()
            .map(|(code, name)| (code.to_string(), name.to_string()))
            .collect();
        for entry in &self.cash {
            let code = entry.account_code.trim();
            if !code.is_empty() && !codes.contains_key(code) {
                codes.insert(code.to_string(), HISTORICAL_CODE_LABEL.to_string());
            }
        }
        codes
            .into_iter()
            .map(|(code, name)| CodeSuggestion { code, name })
            .collect()
    }

    /// Distinct non-empty cash-book categories, sorted.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self
            .cash
            .iter()
            .map(|e| e.category.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();
        categories.sort();
        categories.dedup();
        categories
    }
}
