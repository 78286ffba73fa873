use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::io::Write;
use std::path::Path;

use super::detect::{export_headers, SheetKind};
use crate::models::{AuxiliaryEntry, BudgetItem, CashEntry};

fn amount(value: Decimal) -> String {
    value.normalize().to_string()
}

fn writer<W: Write>(w: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(w)
}

/// Write the cash book with its running balances.
pub fn export_cash<W: Write>(entries: &[CashEntry], w: W) -> Result<()> {
    let mut csv = writer(w);
    csv.write_record(export_headers(SheetKind::Cash))
        .context("Failed to write cash book header")?;
    for e in entries {
        csv.write_record([
            e.date.format("%Y-%m-%d").to_string(),
            e.account_code.clone(),
            e.category.clone(),
            e.description.clone(),
            amount(e.receipt_amount),
            amount(e.disbursement_amount),
            amount(e.balance()),
        ])
        .with_context(|| format!("Failed to write cash entry {}", e.id))?;
    }
    csv.flush().context("Failed to flush cash book")?;
    Ok(())
}

pub fn export_auxiliary<W: Write>(entries: &[AuxiliaryEntry], w: W) -> Result<()> {
    let mut csv = writer(w);
    csv.write_record(export_headers(SheetKind::Auxiliary))
        .context("Failed to write auxiliary book header")?;
    for e in entries {
        csv.write_record([
            e.date.format("%Y-%m-%d").to_string(),
            e.voucher_number.clone(),
            e.category.clone(),
            e.description.clone(),
            amount(e.debit_amount),
            amount(e.credit_amount),
            amount(e.balance()),
        ])
        .with_context(|| format!("Failed to write auxiliary entry {}", e.id))?;
    }
    csv.flush().context("Failed to flush auxiliary book")?;
    Ok(())
}

pub fn export_budget<W: Write>(items: &[BudgetItem], w: W) -> Result<()> {
    let mut csv = writer(w);
    csv.write_record(export_headers(SheetKind::Budget))
        .context("Failed to write budget header")?;
    for item in items {
        csv.write_record([
            item.account_code.clone(),
            item.label.clone(),
            amount(item.amount),
            item.classification.slug().to_string(),
        ])
        .with_context(|| format!("Failed to write budget item '{}'", item.label))?;
    }
    csv.flush().context("Failed to flush budget")?;
    Ok(())
}

/// Export one book of `ledger` to a file, creating or truncating it.
pub fn export_path(ledger: &crate::ledger::Ledger, kind: SheetKind, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    match kind {
        SheetKind::Cash => export_cash(ledger.cash_entries(), file),
        SheetKind::Auxiliary => export_auxiliary(ledger.auxiliary_entries(), file),
        SheetKind::Budget => export_budget(ledger.budget_items(), file),
    }
}
