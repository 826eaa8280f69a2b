#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::input::{NewBill, NewTransaction};
use crate::models::{BillId, TxnId, TxnType};

fn state() -> State {
    demo_state("2026-02").unwrap()
}

fn new_txn(date: &str, kind: &str, amount: &str, category: &str) -> NewTransaction {
    NewTransaction::parse(date, kind, amount, category).unwrap()
}

// ── Seed ──────────────────────────────────────────────────────

#[test]
fn test_demo_state() {
    let s = state();
    assert_eq!(s.plan().month, "2026-02");
    assert_eq!(s.plan().fixed_bills.len(), 3);
    assert_eq!(s.plan().allocations.len(), 5);
    assert_eq!(s.transactions().len(), 6);

    let summary = s.summary();
    assert_eq!(summary.saving_amount, dec!(220));
    assert_eq!(summary.fixed_total, dec!(800));
    assert_eq!(summary.variable_budget, dec!(1180));
    assert_eq!(summary.total_spent, dec!(610));
    assert_eq!(summary.remaining, dec!(570));
    assert!(summary.can_save());
}

#[test]
fn test_demo_state_rejects_bad_month() {
    assert!(demo_state("Feb 2026").is_err());
}

#[test]
fn test_demo_ledger_is_newest_first_and_in_month() {
    let s = state();
    let dates: Vec<NaiveDate> = s.transactions().iter().map(|t| t.date).collect();
    let mut sorted = dates.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(dates, sorted);
    assert!(s
        .transactions()
        .iter()
        .all(|t| t.date.format("%Y-%m").to_string() == "2026-02"));
}

// ── Plan mutations ────────────────────────────────────────────

#[test]
fn test_mutations_return_new_snapshot() {
    let before = state();
    let after = before.update_income(dec!(3000));
    assert_eq!(before.plan().income, dec!(2200));
    assert_eq!(after.plan().income, dec!(3000));
}

#[test]
fn test_update_income_clamps_negative() {
    assert_eq!(state().update_income(dec!(-1)).plan().income, Decimal::ZERO);
}

#[test]
fn test_update_saving_percent_clamps() {
    let s = state().update_saving_percent(dec!(150));
    assert_eq!(s.plan().saving_percent, dec!(100));
    let s = s.update_saving_percent(dec!(-3));
    assert_eq!(s.plan().saving_percent, Decimal::ZERO);
}

#[test]
fn test_add_and_delete_bill() {
    let s = state().add_bill(NewBill::parse("Internet", "30").unwrap());
    let bill = s.plan().fixed_bills.last().unwrap();
    assert_eq!(bill.name, "Internet");
    assert_eq!(bill.id.0, s.last_id());
    assert_eq!(s.summary().fixed_total, dec!(830));

    let id = bill.id;
    let s = s.delete_bill(id);
    assert!(s.plan().find_bill(id).is_none());
    assert_eq!(s.summary().fixed_total, dec!(800));
}

#[test]
fn test_new_ids_are_unique() {
    let s = state()
        .add_bill(NewBill::parse("A", "1").unwrap())
        .add_transaction(new_txn("2026-02-20", "expense", "5", "Courses"))
        .add_bill(NewBill::parse("B", "1").unwrap());

    let mut ids: Vec<u64> = s.plan().fixed_bills.iter().map(|b| b.id.0).collect();
    ids.extend(s.transactions().iter().map(|t| t.id.0));
    let count = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), count);
}

#[test]
fn test_delete_unknown_bill_is_noop() {
    let s = state();
    assert_eq!(s.delete_bill(BillId(999)), s);
}

#[test]
fn test_update_bill_amount() {
    let s = state().update_bill_amount(BillId(2), dec!(50));
    assert_eq!(s.plan().find_bill(BillId(2)).unwrap().amount, dec!(50));
    let s = s.update_bill_amount(BillId(2), dec!(-9));
    assert_eq!(s.plan().find_bill(BillId(2)).unwrap().amount, Decimal::ZERO);
}

#[test]
fn test_update_allocation_percent_and_priority() {
    let s = state()
        .update_allocation_percent("groceries", dec!(140))
        .update_allocation_priority("groceries", 0);
    let groceries = s.plan().find_allocation("Courses").unwrap();
    assert_eq!(groceries.percent, dec!(100));
    assert_eq!(groceries.priority, 1);

    let s = s.update_allocation_priority("groceries", 42);
    assert_eq!(s.plan().find_allocation("Courses").unwrap().priority, 10);
    // Lines follow the new priority.
    assert_eq!(s.summary().lines.last().unwrap().name, "Courses");
}

#[test]
fn test_allocation_sum_flagged_not_rejected() {
    let s = state().update_allocation_percent("other", dec!(20));
    let summary = s.summary();
    assert_eq!(summary.allocation_sum, dec!(115));
    assert!(!summary.can_save());
}

#[test]
fn test_update_unknown_allocation_is_noop() {
    let s = state();
    assert_eq!(s.update_allocation_percent("nope", dec!(10)), s);
}

#[test]
fn test_set_month() {
    let s = state().set_month(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
    assert_eq!(s.plan().month, "2026-03");
}

// ── Ledger mutations ──────────────────────────────────────────

#[test]
fn test_add_transaction_sorted_newest_first() {
    let s = state().add_transaction(new_txn("2026-02-28", "expense", "12", "Courses"));
    let first = &s.transactions()[0];
    assert_eq!(first.date, NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
    assert_eq!(first.txn_type, TxnType::Expense);

    let s = s.add_transaction(new_txn("2026-01-05", "income", "50", "Prime"));
    assert_eq!(s.transactions().last().unwrap().category, "Prime");
}

#[test]
fn test_add_transaction_same_date_goes_first() {
    let s = state();
    let newest = s.transactions()[0].date.format("%Y-%m-%d").to_string();
    let s = s.add_transaction(new_txn(&newest, "expense", "3", "Autres"));
    assert_eq!(s.transactions()[0].id.0, s.last_id());
}

#[test]
fn test_add_transaction_updates_aggregates() {
    let s = state().add_transaction(new_txn("2026-02-20", "expense", "40", "Courses"));
    let summary = s.summary();
    let courses = summary.lines.iter().find(|l| l.name == "Courses").unwrap();
    assert_eq!(courses.actual, dec!(300));
    assert_eq!(summary.total_spent, dec!(650));
}

#[test]
fn test_delete_transaction_updates_aggregates() {
    let s = state();
    let before = s.summary();
    let groceries = s
        .transactions()
        .iter()
        .find(|t| t.category == "Courses")
        .unwrap()
        .id;

    let s = s.delete_transaction(groceries);
    let after = s.summary();

    assert_eq!(s.transactions().len(), 5);
    assert_eq!(before.total_spent - after.total_spent, dec!(260));
    assert_eq!(after.remaining - before.remaining, dec!(260));
    let outings = |sum: &crate::budget::BudgetSummary| {
        sum.lines.iter().find(|l| l.name == "Sorties").unwrap().actual
    };
    assert_eq!(outings(&before), outings(&after));
    assert!(after.buckets.iter().all(|b| b.name != "Courses"));
}

#[test]
fn test_delete_unknown_transaction_is_noop() {
    let s = state();
    assert_eq!(s.delete_transaction(TxnId(12345)), s);
}
