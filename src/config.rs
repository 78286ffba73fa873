use rust_decimal::Decimal;

/// The treasurer's cash account every automatic posting runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CashAccount {
    pub code: String,
    pub label: String,
}

impl Default for CashAccount {
    fn default() -> Self {
        Self {
            code: "1.1.1.01".into(),
            label: "Kas di Bendahara Desa".into(),
        }
    }
}

/// What the realization report does with categories no budget item claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnbudgetedPolicy {
    /// Leave them out of the report entirely.
    #[default]
    Exclude,
    /// List them in a separate section with a zero budget.
    Surface,
}

#[derive(Debug, Clone)]
pub struct LedgerConfig {
    pub cash_account: CashAccount,
    /// Allowed absolute gap between a Nota total and its pending disbursement.
    pub nota_tolerance: Decimal,
    pub unbudgeted_policy: UnbudgetedPolicy,
    /// Code used for imported rows and budget items that arrive without one.
    pub default_account_code: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            cash_account: CashAccount::default(),
            nota_tolerance: Decimal::TWO,
            unbudgeted_policy: UnbudgetedPolicy::default(),
            default_account_code: "00.00".into(),
        }
    }
}
