mod account_ledger;
mod realization;
mod reconcile;
mod summary;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::ledger::Ledger;

pub use account_ledger::{account_ledger, is_credit_normal, AccountLedgerLine};
pub use realization::{
    aggregate, realized_for, report_year, ClassSection, RealizationReport, ReportRow, Totals,
    UnbudgetedRow,
};
pub use reconcile::{reconcile, ReconciliationSummary};
pub use summary::{
    available_years, category_totals, closing_summary, monthly_totals, year_summary,
    CategoryTotal, ClosingSummary, MonthlyTotal, YearSummary,
};

pub(crate) const UNCATEGORIZED: &str = "Lain-lain";

/// `realized / budgeted × 100` rounded half away from zero to two
/// decimals, like displayed amounts; zero when nothing was budgeted.
pub fn percentage(realized: Decimal, budgeted: Decimal) -> Decimal {
    if budgeted <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (realized * Decimal::ONE_HUNDRED / budgeted)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub(crate) fn category_or_default(category: &str) -> &str {
    if category.is_empty() {
        UNCATEGORIZED
    } else {
        category
    }
}

// ── Ledger views ──────────────────────────────────────────────

impl Ledger {
    /// Realization report under this ledger's unbudgeted-category policy.
    pub fn realization_report(&self) -> RealizationReport {
        aggregate(
            self.budget_items(),
            self.cash_entries(),
            self.config().unbudgeted_policy,
        )
    }

    pub fn reconcile(&self, physical_cash: Decimal, physical_bank: Decimal) -> ReconciliationSummary {
        reconcile(
            self.cash_entries(),
            self.auxiliary_entries(),
            physical_cash,
            physical_bank,
        )
    }

    pub fn closing_summary(&self, opening_balance: Decimal, tax_deposit: Decimal) -> ClosingSummary {
        closing_summary(self.cash_entries(), opening_balance, tax_deposit)
    }

    pub fn account_ledger(&self, code: &str) -> Vec<AccountLedgerLine> {
        account_ledger(self.journal(), code)
    }
}
