use std::collections::BTreeSet;

use chrono::Datelike;
use rust_decimal::Decimal;

use crate::config::UnbudgetedPolicy;
use crate::models::{BudgetItem, CashEntry, ClassGroup, Classification};

use super::{category_or_default, percentage};

/// Budgeted against realized for one figure or one subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub budgeted: Decimal,
    pub realized: Decimal,
    /// `realized / budgeted × 100`, two decimals; zero without a budget.
    pub percentage: Decimal,
}

impl Totals {
    pub fn new(budgeted: Decimal, realized: Decimal) -> Self {
        Self {
            budgeted,
            realized,
            percentage: percentage(realized, budgeted),
        }
    }

    fn combine<'a>(parts: impl IntoIterator<Item = &'a Totals>) -> Self {
        let (budgeted, realized) = parts
            .into_iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(b, r), t| {
                (b + t.budgeted, r + t.realized)
            });
        Self::new(budgeted, realized)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub account_code: String,
    pub label: String,
    pub classification: Classification,
    pub totals: Totals,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassSection {
    pub classification: Classification,
    /// Sorted by label.
    pub rows: Vec<ReportRow>,
    pub subtotal: Totals,
}

/// A cash-book category no budget item claims.
#[derive(Debug, Clone, PartialEq)]
pub struct UnbudgetedRow {
    pub category: String,
    pub receipts: Decimal,
    pub disbursements: Decimal,
}

/// Laporan Realisasi Anggaran.
#[derive(Debug, Clone, PartialEq)]
pub struct RealizationReport {
    /// Year of the latest cash-book line, if any.
    pub year: Option<i32>,
    /// One per classification, in `Classification::all()` order.
    pub sections: Vec<ClassSection>,
    pub income: Totals,
    pub routine: Totals,
    pub program: Totals,
    pub expenditure: Totals,
    /// Income minus expenditure; carries no percentage.
    pub surplus: Totals,
    /// Filled only under `UnbudgetedPolicy::Surface`. Never part of any total.
    pub unbudgeted: Vec<UnbudgetedRow>,
}

impl RealizationReport {
    pub fn section(&self, classification: Classification) -> Option<&ClassSection> {
        self.sections
            .iter()
            .find(|s| s.classification == classification)
    }

    pub fn rows(&self) -> impl Iterator<Item = &ReportRow> {
        self.sections.iter().flat_map(|s| s.rows.iter())
    }
}

fn side(entry: &CashEntry, classification: Classification) -> Decimal {
    if classification.is_income() {
        entry.receipt_amount
    } else {
        entry.disbursement_amount
    }
}

/// Realized amount for one budget label, plus every category string that
/// was counted toward it.
///
/// An exact (trimmed) category match wins. Only when no line carries the
/// exact label are categories equal ignoring case summed instead.
pub fn realized_for<'a>(
    label: &str,
    classification: Classification,
    entries: &'a [CashEntry],
) -> (Decimal, Vec<&'a str>) {
    let label = label.trim();
    let exact: Vec<&'a CashEntry> = entries
        .iter()
        .filter(|e| e.category.trim() == label)
        .collect();
    let matched: Vec<&'a CashEntry> = if exact.is_empty() {
        let lower = label.to_lowercase();
        entries
            .iter()
            .filter(|e| e.category.trim().to_lowercase() == lower)
            .collect()
    } else {
        exact
    };

    let total: Decimal = matched.iter().map(|e| side(e, classification)).sum();
    let categories = matched.into_iter().map(|e| e.category.trim()).collect();
    (total, categories)
}

/// Compare budget items against realized cash-book amounts.
pub fn aggregate(
    items: &[BudgetItem],
    entries: &[CashEntry],
    policy: UnbudgetedPolicy,
) -> RealizationReport {
    let mut counted: BTreeSet<&str> = BTreeSet::new();

    let sections: Vec<ClassSection> = Classification::all()
        .iter()
        .map(|&classification| {
            let mut rows: Vec<ReportRow> = items
                .iter()
                .filter(|item| item.classification == classification)
                .map(|item| {
                    let (realized, categories) =
                        realized_for(&item.label, classification, entries);
                    counted.extend(categories);
                    ReportRow {
                        account_code: item.account_code.clone(),
                        label: item.label.clone(),
                        classification,
                        totals: Totals::new(item.amount, realized),
                    }
                })
                .collect();
            rows.sort_by(|a, b| a.label.cmp(&b.label));
            let subtotal = Totals::combine(rows.iter().map(|r| &r.totals));
            ClassSection {
                classification,
                rows,
                subtotal,
            }
        })
        .collect();

    let group_total = |group: ClassGroup| {
        Totals::combine(
            sections
                .iter()
                .filter(|s| s.classification.group() == group)
                .map(|s| &s.subtotal),
        )
    };
    let income = group_total(ClassGroup::Income);
    let routine = group_total(ClassGroup::Routine);
    let program = group_total(ClassGroup::Program);
    let expenditure = Totals::combine([&routine, &program]);
    let surplus = Totals {
        budgeted: income.budgeted - expenditure.budgeted,
        realized: income.realized - expenditure.realized,
        percentage: Decimal::ZERO,
    };

    let unbudgeted = match policy {
        UnbudgetedPolicy::Exclude => Vec::new(),
        UnbudgetedPolicy::Surface => unbudgeted_rows(entries, &counted),
    };

    RealizationReport {
        year: report_year(entries),
        sections,
        income,
        routine,
        program,
        expenditure,
        surplus,
        unbudgeted,
    }
}

fn unbudgeted_rows(entries: &[CashEntry], counted: &BTreeSet<&str>) -> Vec<UnbudgetedRow> {
    let mut rows: Vec<UnbudgetedRow> = Vec::new();
    for entry in entries {
        let category = entry.category.trim();
        if counted.contains(category) {
            continue;
        }
        let category = category_or_default(category);
        match rows.iter_mut().find(|r| r.category == category) {
            Some(row) => {
                row.receipts += entry.receipt_amount;
                row.disbursements += entry.disbursement_amount;
            }
            None => rows.push(UnbudgetedRow {
                category: category.to_string(),
                receipts: entry.receipt_amount,
                disbursements: entry.disbursement_amount,
            }),
        }
    }
    rows.sort_by(|a, b| a.category.cmp(&b.category));
    rows
}

/// Fiscal year the report closes: the year of the latest entry.
pub fn report_year(entries: &[CashEntry]) -> Option<i32> {
    entries.iter().map(|e| e.date).max().map(|d| d.year())
}
