use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::TxnId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnType {
    Income,
    Expense,
}

impl TxnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" | "+" => Some(Self::Income),
            "expense" | "out" | "-" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl std::fmt::Display for TxnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// An actual cash-flow event. `amount` is always positive; the direction
/// lives in `txn_type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: TxnId,
    pub date: NaiveDate,
    pub category: String,
    pub txn_type: TxnType,
    pub amount: Decimal,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.txn_type == TxnType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.txn_type == TxnType::Expense
    }

    /// Amount with the sign of its direction: expenses are negative.
    pub fn signed_amount(&self) -> Decimal {
        match self.txn_type {
            TxnType::Income => self.amount,
            TxnType::Expense => -self.amount,
        }
    }
}

/// Ledger filter by transaction direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    pub fn all() -> &'static [TypeFilter] {
        &[Self::All, Self::Income, Self::Expense]
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Some(Self::All),
            other => TxnType::parse(other).map(|t| match t {
                TxnType::Income => Self::Income,
                TxnType::Expense => Self::Expense,
            }),
        }
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        match self {
            Self::All => true,
            Self::Income => txn.is_income(),
            Self::Expense => txn.is_expense(),
        }
    }
}

impl std::fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expenses"),
        }
    }
}
