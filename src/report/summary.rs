use chrono::Datelike;
use rust_decimal::Decimal;

use crate::format::MONTHS_SHORT;
use crate::models::CashEntry;

use super::category_or_default;

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

/// Saldo Akhir: the year-end closing position.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosingSummary {
    pub opening_balance: Decimal,
    pub total_receipts: Decimal,
    pub total_disbursements: Decimal,
    pub tax_deposit: Decimal,
    /// Opening balance plus receipts.
    pub cumulative_debit: Decimal,
    /// Disbursements plus tax deposited.
    pub cumulative_credit: Decimal,
    pub closing_cash: Decimal,
    /// Highest total first.
    pub income_by_category: Vec<CategoryTotal>,
    pub expense_by_category: Vec<CategoryTotal>,
}

pub fn closing_summary(
    entries: &[CashEntry],
    opening_balance: Decimal,
    tax_deposit: Decimal,
) -> ClosingSummary {
    let total_receipts: Decimal = entries.iter().map(|e| e.receipt_amount).sum();
    let total_disbursements: Decimal = entries.iter().map(|e| e.disbursement_amount).sum();
    let cumulative_debit = opening_balance + total_receipts;
    let cumulative_credit = total_disbursements + tax_deposit;

    ClosingSummary {
        opening_balance,
        total_receipts,
        total_disbursements,
        tax_deposit,
        cumulative_debit,
        cumulative_credit,
        closing_cash: cumulative_debit - cumulative_credit,
        income_by_category: category_totals(entries, |e| e.receipt_amount),
        expense_by_category: category_totals(entries, |e| e.disbursement_amount),
    }
}

/// Group nonzero amounts by category, largest first. Ties fall back to
/// category name.
pub fn category_totals(
    entries: &[CashEntry],
    amount: impl Fn(&CashEntry) -> Decimal,
) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for entry in entries {
        let value = amount(entry);
        if value <= Decimal::ZERO {
            continue;
        }
        let category = category_or_default(entry.category.trim());
        match totals.iter_mut().find(|t| t.category == category) {
            Some(t) => t.total += value,
            None => totals.push(CategoryTotal {
                category: category.to_string(),
                total: value,
            }),
        }
    }
    totals.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    totals
}

// ── Dashboard ─────────────────────────────────────────────────

/// Years that have cash-book lines, plus `current_year`, newest first.
pub fn available_years(entries: &[CashEntry], current_year: i32) -> Vec<i32> {
    let mut years: Vec<i32> = entries.iter().map(|e| e.date.year()).collect();
    years.push(current_year);
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearSummary {
    pub year: i32,
    pub receipts: Decimal,
    pub disbursements: Decimal,
    /// Running balance after the year's last line; zero for an empty year.
    pub balance: Decimal,
    pub income_by_category: Vec<CategoryTotal>,
    pub expense_by_category: Vec<CategoryTotal>,
}

pub fn year_summary(entries: &[CashEntry], year: i32) -> YearSummary {
    let in_year: Vec<CashEntry> = entries
        .iter()
        .filter(|e| e.date.year() == year)
        .cloned()
        .collect();
    let balance = in_year
        .iter()
        .max_by_key(|e| (e.date, e.id))
        .map(CashEntry::balance)
        .unwrap_or_default();

    YearSummary {
        year,
        receipts: in_year.iter().map(|e| e.receipt_amount).sum(),
        disbursements: in_year.iter().map(|e| e.disbursement_amount).sum(),
        balance,
        income_by_category: category_totals(&in_year, |e| e.receipt_amount),
        expense_by_category: category_totals(&in_year, |e| e.disbursement_amount),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTotal {
    /// e.g. `"Agu 2024"`
    pub label: String,
    pub month: u32,
    pub receipts: Decimal,
    pub disbursements: Decimal,
}

/// Twelve buckets, January first, zero-filled.
pub fn monthly_totals(entries: &[CashEntry], year: i32) -> Vec<MonthlyTotal> {
    let mut months: Vec<MonthlyTotal> = MONTHS_SHORT
        .iter()
        .zip(1u32..)
        .map(|(name, month)| MonthlyTotal {
            label: format!("{name} {year}"),
            month,
            receipts: Decimal::ZERO,
            disbursements: Decimal::ZERO,
        })
        .collect();

    for entry in entries.iter().filter(|e| e.date.year() == year) {
        let bucket = &mut months[entry.date.month0() as usize];
        bucket.receipts += entry.receipt_amount;
        bucket.disbursements += entry.disbursement_amount;
    }
    months
}
