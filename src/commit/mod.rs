//! The confirm-before-commit protocol that turns a receipt or expenditure
//! draft into matching cash-book, auxiliary-book and journal records.
//!
//! ```text
//! Drafting ──submit──▶ AwaitingReceiptConfirmation ──confirm_receipt──▶ Committed
//!          └─────────▶ AwaitingNotaConfirmation    ──confirm_nota─────▶ Committed
//!                      (either awaiting state) ──cancel──▶ Cancelled
//! ```

mod draft;

use tracing::{debug, info};

use crate::error::{LedgerError, Result};
use crate::format::terbilang_rupiah;
use crate::ledger::Ledger;
use crate::models::{Direction, EntryId, NewAuxiliaryEntry};

pub use draft::{
    Kwitansi, Nota, NotaLine, NotaReceipt, PendingTransaction, ReceiptConfirmation,
    TransactionDraft,
};

#[derive(Debug, Clone, PartialEq)]
pub enum CommitState {
    Drafting,
    AwaitingReceiptConfirmation(PendingTransaction),
    AwaitingNotaConfirmation(PendingTransaction),
    /// Holds the id of the cash-book line that was written.
    Committed(EntryId),
    Cancelled,
}

impl CommitState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Drafting => "drafting",
            Self::AwaitingReceiptConfirmation(_) => "awaiting receipt confirmation",
            Self::AwaitingNotaConfirmation(_) => "awaiting nota confirmation",
            Self::Committed(_) => "committed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Committed(_) | Self::Cancelled)
    }
}

/// One in-flight transaction. Nothing reaches the ledger before a
/// confirm call succeeds.
#[derive(Debug, Clone)]
pub struct CommitFlow {
    state: CommitState,
}

impl Default for CommitFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl CommitFlow {
    pub fn new() -> Self {
        Self {
            state: CommitState::Drafting,
        }
    }

    pub fn state(&self) -> &CommitState {
        &self.state
    }

    pub fn pending(&self) -> Option<&PendingTransaction> {
        match &self.state {
            CommitState::AwaitingReceiptConfirmation(p) | CommitState::AwaitingNotaConfirmation(p) => {
                Some(p)
            }
            _ => None,
        }
    }

    /// Validate the draft and move to the confirmation step its direction
    /// calls for. A failed validation leaves the flow in `Drafting`.
    pub fn submit(&mut self, draft: TransactionDraft) -> Result<&PendingTransaction> {
        if self.state != CommitState::Drafting {
            return Err(self.invalid("submit"));
        }
        draft.validate()?;

        let pending = PendingTransaction::from_draft(draft);
        debug!(
            direction = %pending.direction,
            amount = %pending.amount,
            "transaction pending confirmation"
        );
        self.state = match pending.direction {
            Direction::Receipt => CommitState::AwaitingReceiptConfirmation(pending),
            Direction::Disbursement => CommitState::AwaitingNotaConfirmation(pending),
        };
        self.pending()
            .ok_or_else(|| LedgerError::InvalidState("no pending transaction".into()))
    }

    /// Commit a pending receipt: one cash line, one auxiliary debit line,
    /// one journal posting.
    pub fn confirm_receipt(
        &mut self,
        ledger: &mut Ledger,
        confirmation: ReceiptConfirmation,
    ) -> Result<Kwitansi> {
        let CommitState::AwaitingReceiptConfirmation(pending) = &self.state else {
            return Err(self.invalid("confirm a receipt"));
        };

        let purpose = confirmation
            .purpose
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| pending.purpose.clone());
        let voucher = confirmation
            .voucher_number
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| format!("KW-{:04}", ledger.peek_next_id()));

        let auxiliary = NewAuxiliaryEntry::debit(
            pending.date,
            voucher.clone(),
            pending.category.clone(),
            format!("Penerimaan dari {} untuk {}", pending.counterparty, purpose.trim()),
            pending.amount,
        );
        let id = ledger.commit_transaction(pending.to_cash_entry(), vec![auxiliary])?;

        let kwitansi = Kwitansi {
            cash_entry_id: id,
            voucher_number: voucher,
            date: pending.date,
            received_from: pending.counterparty.clone(),
            amount: pending.amount,
            amount_in_words: terbilang_rupiah(pending.amount),
            purpose: purpose.trim().to_string(),
        };
        info!(id, voucher = %kwitansi.voucher_number, "receipt confirmed");
        self.state = CommitState::Committed(id);
        Ok(kwitansi)
    }

    /// Commit a pending disbursement against its Nota. The line totals must
    /// land within the ledger's tolerance of the pending amount; otherwise
    /// the flow stays put so the lines can be corrected.
    pub fn confirm_nota(&mut self, ledger: &mut Ledger, nota: Nota) -> Result<NotaReceipt> {
        let CommitState::AwaitingNotaConfirmation(pending) = &self.state else {
            return Err(self.invalid("confirm a nota"));
        };

        nota.check_lines()?;
        let total = nota.total();
        let difference = pending.amount - total;
        if difference.abs() > ledger.config().nota_tolerance {
            return Err(LedgerError::ReconciliationMismatch {
                expected: pending.amount,
                actual: total,
                difference,
            });
        }

        let voucher = nota
            .voucher_number
            .clone()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| format!("NOTA-{:04}", ledger.peek_next_id()));
        let lines = nota.auxiliary_lines(pending, &voucher);
        let lines_recorded = lines.len();
        let id = ledger.commit_transaction(pending.to_cash_entry(), lines)?;

        let receipt = NotaReceipt {
            cash_entry_id: id,
            voucher_number: voucher,
            paid_to: pending.counterparty.clone(),
            total,
            lines_recorded,
        };
        info!(id, voucher = %receipt.voucher_number, lines = lines_recorded, "nota confirmed");
        self.state = CommitState::Committed(id);
        Ok(receipt)
    }

    /// Drop the pending transaction. Nothing was written, so nothing is
    /// undone.
    pub fn cancel(&mut self) -> Result<()> {
        if self.state.is_terminal() {
            return Err(self.invalid("cancel"));
        }
        debug!(from = self.state.name(), "transaction cancelled");
        self.state = CommitState::Cancelled;
        Ok(())
    }

    fn invalid(&self, action: &str) -> LedgerError {
        LedgerError::InvalidState(format!("cannot {action} while {}", self.state.name()))
    }
}

#[cfg(test)]
mod tests;
