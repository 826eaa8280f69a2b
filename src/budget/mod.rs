//! Budget arithmetic: turns a [`Plan`] and the ledger into a [`BudgetSummary`].
//!
//! Everything here is a pure function of its inputs. Numeric inputs are
//! expected to be clamped already (see `crate::input`); the calculator itself
//! never fails, never divides by zero and saturates instead of overflowing.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{Plan, Transaction};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    Ok,
    /// Savings plus fixed bills exceed income.
    Impossible,
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Impossible => write!(f, "impossible"),
        }
    }
}

/// Planned vs actual for one allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationLine {
    pub id: String,
    pub name: String,
    pub percent: Decimal,
    pub priority: u8,
    pub planned: Decimal,
    pub actual: Decimal,
    pub delta: Decimal,
    /// `actual / planned`, 0 when nothing is planned.
    pub progress: Decimal,
}

/// Total spent in one expense category, as drawn on the ring chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBucket {
    pub name: String,
    pub value: Decimal,
    /// Whole percent of the variable budget.
    pub share: Decimal,
    /// An allocation with exactly this name exists.
    pub matched: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetSummary {
    pub income: Decimal,
    pub saving_amount: Decimal,
    pub fixed_total: Decimal,
    pub after_saving: Decimal,
    pub variable_budget: Decimal,
    pub allocation_sum: Decimal,
    pub status: BudgetStatus,
    pub total_income: Decimal,
    pub total_spent: Decimal,
    pub remaining: Decimal,
    /// Sorted by ascending priority.
    pub lines: Vec<AllocationLine>,
    pub buckets: Vec<CategoryBucket>,
}

impl BudgetSummary {
    pub fn is_impossible(&self) -> bool {
        self.status == BudgetStatus::Impossible
    }

    /// Spending has exceeded the variable budget. Independent of
    /// [`BudgetStatus`]: a plan can be impossible and over budget at once.
    pub fn is_over_budget(&self) -> bool {
        self.remaining < Decimal::ZERO
    }

    /// Allocation percentages add up to exactly 100 (to two decimals).
    pub fn can_save(&self) -> bool {
        round_half_up(self.allocation_sum, 2) == HUNDRED
    }
}

pub fn compute(plan: &Plan, transactions: &[Transaction]) -> BudgetSummary {
    let saving_amount = percent_of(plan.income, plan.saving_percent);
    let fixed_total = total(plan.fixed_bills.iter().map(|b| b.amount));
    let after_saving = plan.income.saturating_sub(saving_amount);
    let variable_budget = after_saving.saturating_sub(fixed_total);
    let allocation_sum = total(plan.allocations.iter().map(|a| a.percent));

    let status = if variable_budget < Decimal::ZERO {
        BudgetStatus::Impossible
    } else {
        BudgetStatus::Ok
    };

    let total_income = total(
        transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount),
    );
    let total_spent = total(
        transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount),
    );

    let lines = plan
        .allocations_by_priority()
        .into_iter()
        .map(|a| {
            let planned = if variable_budget > Decimal::ZERO {
                percent_of(variable_budget, a.percent)
            } else {
                Decimal::ZERO
            };
            let actual = spent_in(transactions, &a.name);
            AllocationLine {
                id: a.id.clone(),
                name: a.name.clone(),
                percent: a.percent,
                priority: a.priority,
                planned,
                actual,
                delta: planned.saturating_sub(actual),
                progress: ratio(actual, planned),
            }
        })
        .collect();

    BudgetSummary {
        income: plan.income,
        saving_amount,
        fixed_total,
        after_saving,
        variable_budget,
        allocation_sum,
        status,
        total_income,
        total_spent,
        remaining: variable_budget.saturating_sub(total_spent),
        lines,
        buckets: category_buckets(plan, transactions, variable_budget),
    }
}

/// Sum of expenses whose category equals `name` exactly.
fn spent_in(transactions: &[Transaction], name: &str) -> Decimal {
    total(
        transactions
            .iter()
            .filter(|t| t.is_expense() && t.category == name)
            .map(|t| t.amount),
    )
}

/// Expense totals per category. Categories backed by an allocation come
/// first in priority order, the rest follow in the order they were seen.
fn category_buckets(
    plan: &Plan,
    transactions: &[Transaction],
    variable_budget: Decimal,
) -> Vec<CategoryBucket> {
    let mut totals: Vec<(String, Decimal)> = Vec::new();
    for txn in transactions.iter().filter(|t| t.is_expense()) {
        match totals.iter_mut().find(|(name, _)| *name == txn.category) {
            Some((_, value)) => *value = value.saturating_add(txn.amount),
            None => totals.push((txn.category.clone(), txn.amount)),
        }
    }

    let mut buckets: Vec<(Option<u8>, CategoryBucket)> = totals
        .into_iter()
        .map(|(name, value)| {
            let priority = plan.find_allocation(&name).map(|a| a.priority);
            let share = if variable_budget > Decimal::ZERO {
                round_half_up(ratio(value.saturating_mul(HUNDRED), variable_budget), 0)
            } else {
                Decimal::ZERO
            };
            let bucket = CategoryBucket {
                matched: priority.is_some(),
                name,
                value,
                share,
            };
            (priority, bucket)
        })
        .collect();

    // None sorts after every Some(_) once mapped to u16::MAX.
    buckets.sort_by_key(|(priority, _)| priority.map_or(u16::MAX, u16::from));
    buckets.into_iter().map(|(_, b)| b).collect()
}

fn total(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, Decimal::saturating_add)
}

/// `value * percent / 100`.
fn percent_of(value: Decimal, percent: Decimal) -> Decimal {
    ratio(value.saturating_mul(percent), HUNDRED)
}

fn ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests;
