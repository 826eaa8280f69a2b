//! The in-memory state of the application.
//!
//! [`State`] is an immutable snapshot of the plan and the ledger. Every
//! mutation entry point takes already-validated input and returns a new
//! snapshot; the UI swaps the old one out and recomputes the summary.

mod seed;

pub use seed::demo_state;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::budget::{self, BudgetSummary};
use crate::input::{self, NewBill, NewTransaction};
use crate::models::{BillId, FixedBill, Plan, Transaction, TxnId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    plan: Plan,
    transactions: Vec<Transaction>,
    next_id: u64,
}

impl State {
    /// Build a snapshot from existing records. Transactions are sorted newest
    /// first and fresh ids start above every id already in use.
    pub fn new(plan: Plan, mut transactions: Vec<Transaction>) -> Self {
        sort_ledger(&mut transactions);
        let max_bill = plan.fixed_bills.iter().map(|b| b.id.0).max().unwrap_or(0);
        let max_txn = transactions.iter().map(|t| t.id.0).max().unwrap_or(0);
        Self {
            plan,
            transactions,
            next_id: max_bill.max(max_txn) + 1,
        }
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    /// The ledger, newest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn summary(&self) -> BudgetSummary {
        budget::compute(&self.plan, &self.transactions)
    }

    pub fn update_income(&self, income: Decimal) -> Self {
        let mut next = self.clone();
        next.plan.income = income.max(Decimal::ZERO);
        next
    }

    pub fn update_saving_percent(&self, percent: Decimal) -> Self {
        let mut next = self.clone();
        next.plan.saving_percent = input::clamp_percent(percent);
        next
    }

    pub fn set_month(&self, first_day: NaiveDate) -> Self {
        let mut next = self.clone();
        next.plan.month = first_day.format("%Y-%m").to_string();
        next
    }

    pub fn add_bill(&self, bill: NewBill) -> Self {
        let mut next = self.clone();
        let id = BillId(next.take_id());
        next.plan.fixed_bills.push(FixedBill {
            id,
            name: bill.name,
            amount: bill.amount,
        });
        next
    }

    /// Unknown ids leave the plan unchanged.
    pub fn delete_bill(&self, id: BillId) -> Self {
        let mut next = self.clone();
        next.plan.fixed_bills.retain(|b| b.id != id);
        next
    }

    pub fn update_bill_amount(&self, id: BillId, amount: Decimal) -> Self {
        let mut next = self.clone();
        if let Some(bill) = next.plan.fixed_bills.iter_mut().find(|b| b.id == id) {
            bill.amount = amount.max(Decimal::ZERO);
        }
        next
    }

    pub fn update_allocation_percent(&self, id: &str, percent: Decimal) -> Self {
        let mut next = self.clone();
        if let Some(alloc) = next.plan.allocations.iter_mut().find(|a| a.id == id) {
            alloc.percent = input::clamp_percent(percent);
        }
        next
    }

    pub fn update_allocation_priority(&self, id: &str, priority: u8) -> Self {
        let mut next = self.clone();
        if let Some(alloc) = next.plan.allocations.iter_mut().find(|a| a.id == id) {
            alloc.priority = input::clamp_priority(i64::from(priority));
        }
        next
    }

    pub fn add_transaction(&self, txn: NewTransaction) -> Self {
        let mut next = self.clone();
        let id = TxnId(next.take_id());
        next.transactions.insert(
            0,
            Transaction {
                id,
                date: txn.date,
                category: txn.category,
                txn_type: txn.txn_type,
                amount: txn.amount,
            },
        );
        sort_ledger(&mut next.transactions);
        next
    }

    pub fn delete_transaction(&self, id: TxnId) -> Self {
        let mut next = self.clone();
        next.transactions.retain(|t| t.id != id);
        next
    }

    /// Id of the most recently created bill or transaction.
    pub fn last_id(&self) -> u64 {
        self.next_id - 1
    }

    fn take_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Newest first. The sort is stable, so a freshly inserted entry stays ahead
/// of older entries sharing its date.
fn sort_ledger(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
}

#[cfg(test)]
mod tests;
