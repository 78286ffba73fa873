use rust_decimal::Decimal;

use super::EntryId;

/// Fiscal classification of a budget line (APBDes Adat structure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Classification {
    Income,
    RoutineIncentive,
    RoutineOperational,
    ProgramParhyangan,
    ProgramPawongan,
    ProgramPalemahan,
}

/// Top-level section a classification rolls up into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassGroup {
    Income,
    Routine,
    Program,
}

impl Classification {
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Income => "pendapatan",
            Self::RoutineIncentive => "belanja-rutin-insentif",
            Self::RoutineOperational => "belanja-rutin-operasional",
            Self::ProgramParhyangan => "belanja-program-parhyangan",
            Self::ProgramPawongan => "belanja-program-pawongan",
            Self::ProgramPalemahan => "belanja-program-palemahan",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "Pendapatan",
            Self::RoutineIncentive => "Rutin (Insentif)",
            Self::RoutineOperational => "Rutin (Operasional)",
            Self::ProgramParhyangan => "Baga Parhyangan",
            Self::ProgramPawongan => "Baga Pawongan",
            Self::ProgramPalemahan => "Baga Palemahan",
        }
    }

    pub fn group(&self) -> ClassGroup {
        match self {
            Self::Income => ClassGroup::Income,
            Self::RoutineIncentive | Self::RoutineOperational => ClassGroup::Routine,
            Self::ProgramParhyangan | Self::ProgramPawongan | Self::ProgramPalemahan => {
                ClassGroup::Program
            }
        }
    }

    pub fn is_income(&self) -> bool {
        self.group() == ClassGroup::Income
    }

    /// Accepts the slug, the label, or a short English name.
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|c| c.slug() == lower || c.label().to_lowercase() == lower)
            .or(match lower.as_str() {
                "income" | "pendapatan" => Some(Self::Income),
                "routine-incentive" | "insentif" => Some(Self::RoutineIncentive),
                "routine-operational" | "operasional" => Some(Self::RoutineOperational),
                "program-parhyangan" | "parhyangan" => Some(Self::ProgramParhyangan),
                "program-pawongan" | "pawongan" => Some(Self::ProgramPawongan),
                "program-palemahan" | "palemahan" => Some(Self::ProgramPalemahan),
                _ => None,
            })
    }

    pub fn all() -> &'static [Classification] {
        &[
            Self::Income,
            Self::RoutineIncentive,
            Self::RoutineOperational,
            Self::ProgramParhyangan,
            Self::ProgramPawongan,
            Self::ProgramPalemahan,
        ]
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetItem {
    pub id: Option<EntryId>,
    pub account_code: String,
    /// Category name; the join key against cash-book categories.
    pub label: String,
    pub amount: Decimal,
    pub classification: Classification,
}

impl BudgetItem {
    pub fn new(
        account_code: impl Into<String>,
        label: impl Into<String>,
        amount: Decimal,
        classification: Classification,
    ) -> Self {
        Self {
            id: None,
            account_code: account_code.into(),
            label: label.into(),
            amount,
            classification,
        }
    }
}
