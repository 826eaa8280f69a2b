#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::{Allocation, BillId, FixedBill, Plan, Transaction, TxnId, TxnType};

fn bill(id: u64, name: &str, amount: Decimal) -> FixedBill {
    FixedBill {
        id: BillId(id),
        name: name.into(),
        amount,
    }
}

fn txn(id: u64, category: &str, txn_type: TxnType, amount: Decimal) -> Transaction {
    Transaction {
        id: TxnId(id),
        date: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
        category: category.into(),
        txn_type,
        amount,
    }
}

fn expense(id: u64, category: &str, amount: Decimal) -> Transaction {
    txn(id, category, TxnType::Expense, amount)
}

/// income 2200, 10 % saved, 780 of bills: variable budget 1200.
fn sample_plan() -> Plan {
    Plan {
        month: "2026-02".into(),
        income: dec!(2200),
        saving_percent: dec!(10),
        fixed_bills: vec![bill(1, "Loyer", dec!(750)), bill(2, "Téléphone", dec!(30))],
        allocations: vec![
            Allocation::new("outings", "Sorties", dec!(25), 2),
            Allocation::new("groceries", "Courses", dec!(45), 1),
            Allocation::new("transport", "Transport", dec!(15), 3),
            Allocation::new("health", "Santé", dec!(10), 4),
            Allocation::new("other", "Autres", dec!(5), 5),
        ],
    }
}

fn line<'a>(summary: &'a BudgetSummary, name: &str) -> &'a AllocationLine {
    summary.lines.iter().find(|l| l.name == name).unwrap()
}

// ── Plan arithmetic ───────────────────────────────────────────

#[test]
fn test_plan_totals() {
    let summary = compute(&sample_plan(), &[]);

    assert_eq!(summary.income, dec!(2200));
    assert_eq!(summary.saving_amount, dec!(220));
    assert_eq!(summary.fixed_total, dec!(780));
    assert_eq!(summary.after_saving, dec!(1980));
    assert_eq!(summary.variable_budget, dec!(1200));
    assert_eq!(summary.allocation_sum, dec!(100));
    assert_eq!(summary.status, BudgetStatus::Ok);
    assert!(summary.can_save());
}

#[test]
fn test_planned_vs_actual() {
    let summary = compute(&sample_plan(), &[expense(1, "Courses", dec!(260))]);

    let courses = line(&summary, "Courses");
    assert_eq!(courses.planned, dec!(540));
    assert_eq!(courses.actual, dec!(260));
    assert_eq!(courses.delta, dec!(280));
    assert_eq!(courses.progress.round_dp(2), dec!(0.48));

    let outings = line(&summary, "Sorties");
    assert_eq!(outings.planned, dec!(300));
    assert_eq!(outings.actual, Decimal::ZERO);
    assert_eq!(outings.progress, Decimal::ZERO);
}

#[test]
fn test_fixed_bills_only_plan() {
    let mut plan = sample_plan();
    plan.fixed_bills = vec![bill(1, "Loyer", dec!(800))];
    let summary = compute(&plan, &[]);
    assert_eq!(summary.variable_budget, dec!(1180));
}

#[test]
fn test_lines_sorted_by_priority() {
    let summary = compute(&sample_plan(), &[]);
    let priorities: Vec<u8> = summary.lines.iter().map(|l| l.priority).collect();
    assert_eq!(priorities, vec![1, 2, 3, 4, 5]);
    assert_eq!(summary.lines[0].name, "Courses");
}

#[test]
fn test_fractional_percentages() {
    let mut plan = sample_plan();
    plan.saving_percent = dec!(12.5);
    let summary = compute(&plan, &[]);
    assert_eq!(summary.saving_amount, dec!(275));
}

// ── Status and warnings ───────────────────────────────────────

#[test]
fn test_impossible_when_bills_exceed_income() {
    let mut plan = sample_plan();
    plan.fixed_bills.push(bill(3, "Voiture", dec!(1500)));
    let summary = compute(&plan, &[]);

    assert!(summary.variable_budget < Decimal::ZERO);
    assert_eq!(summary.status, BudgetStatus::Impossible);
    assert!(summary.is_impossible());
    // No negative envelopes.
    assert!(summary.lines.iter().all(|l| l.planned == Decimal::ZERO));
    assert!(summary.lines.iter().all(|l| l.progress == Decimal::ZERO));
}

#[test]
fn test_status_ignores_spending() {
    let summary = compute(&sample_plan(), &[expense(1, "Courses", dec!(5000))]);
    assert_eq!(summary.status, BudgetStatus::Ok);
    assert!(summary.is_over_budget());
}

#[test]
fn test_over_budget_and_impossible_together() {
    let mut plan = sample_plan();
    plan.saving_percent = dec!(100);
    let summary = compute(&plan, &[expense(1, "Courses", dec!(10))]);
    assert!(summary.is_impossible());
    assert!(summary.is_over_budget());
}

#[test]
fn test_remaining_exactly_zero_is_not_over_budget() {
    let summary = compute(&sample_plan(), &[expense(1, "Autres", dec!(1200))]);
    assert_eq!(summary.remaining, Decimal::ZERO);
    assert!(!summary.is_over_budget());
}

#[test]
fn test_zero_variable_budget_guards_ratios() {
    let mut plan = sample_plan();
    plan.income = dec!(1000);
    plan.saving_percent = dec!(22);
    // 1000 - 220 - 780 = 0
    let summary = compute(&plan, &[expense(1, "Courses", dec!(40))]);

    assert_eq!(summary.variable_budget, Decimal::ZERO);
    assert_eq!(summary.status, BudgetStatus::Ok);
    for l in &summary.lines {
        assert_eq!(l.planned, Decimal::ZERO);
        assert_eq!(l.progress, Decimal::ZERO);
    }
    assert_eq!(summary.buckets[0].share, Decimal::ZERO);
}

#[test]
fn test_can_save_requires_hundred_percent() {
    let mut plan = sample_plan();
    plan.allocations[0].percent = dec!(30);
    let summary = compute(&plan, &[]);
    assert_eq!(summary.allocation_sum, dec!(105));
    assert!(!summary.can_save());

    plan.allocations[0].percent = dec!(24.999);
    assert!(compute(&plan, &[]).can_save());
}

#[test]
fn test_status_display() {
    assert_eq!(BudgetStatus::Ok.to_string(), "ok");
    assert_eq!(BudgetStatus::Impossible.to_string(), "impossible");
}

// ── Category aggregation ──────────────────────────────────────

#[test]
fn test_income_does_not_count_as_spending() {
    let txns = vec![
        txn(1, "Courses", TxnType::Income, dec!(100)),
        expense(2, "Courses", dec!(40)),
    ];
    let summary = compute(&sample_plan(), &txns);
    assert_eq!(line(&summary, "Courses").actual, dec!(40));
    assert_eq!(summary.total_spent, dec!(40));
    assert_eq!(summary.total_income, dec!(100));
}

#[test]
fn test_category_match_is_exact() {
    let txns = vec![
        expense(1, "courses", dec!(10)),
        expense(2, "Courses ", dec!(20)),
        expense(3, "Courses", dec!(30)),
    ];
    let summary = compute(&sample_plan(), &txns);
    assert_eq!(line(&summary, "Courses").actual, dec!(30));
    assert_eq!(summary.total_spent, dec!(60));
    assert_eq!(summary.buckets.len(), 3);
}

#[test]
fn test_unmatched_categories_get_own_bucket() {
    let txns = vec![
        expense(1, "Cadeaux", dec!(50)),
        expense(2, "Sorties", dec!(60)),
        expense(3, "Courses", dec!(120)),
        expense(4, "Cadeaux", dec!(10)),
    ];
    let summary = compute(&sample_plan(), &txns);

    let names: Vec<&str> = summary.buckets.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Courses", "Sorties", "Cadeaux"]);

    let gifts = &summary.buckets[2];
    assert!(!gifts.matched);
    assert_eq!(gifts.value, dec!(60));
    // 60 / 1200 = 5 %
    assert_eq!(gifts.share, dec!(5));

    assert!(summary.buckets[0].matched);
    // Unmatched spending still counts against the variable budget.
    assert_eq!(summary.remaining, dec!(1200) - dec!(240));
}

#[test]
fn test_bucket_share_rounds_half_up() {
    // 6 / 1200 = 0.5 %
    let summary = compute(&sample_plan(), &[expense(1, "Courses", dec!(6))]);
    assert_eq!(summary.buckets[0].share, dec!(1));
}

#[test]
fn test_delete_removes_only_that_transaction() {
    let txns = vec![
        expense(1, "Courses", dec!(100)),
        expense(2, "Courses", dec!(60)),
        expense(3, "Sorties", dec!(40)),
    ];
    let before = compute(&sample_plan(), &txns);
    let after = compute(&sample_plan(), &txns[1..]);

    assert_eq!(before.total_spent - after.total_spent, dec!(100));
    assert_eq!(line(&after, "Courses").actual, dec!(60));
    assert_eq!(line(&after, "Sorties").actual, line(&before, "Sorties").actual);
    assert_eq!(after.remaining - before.remaining, dec!(100));
}

#[test]
fn test_empty_plan() {
    let plan = Plan {
        month: "2026-02".into(),
        income: Decimal::ZERO,
        saving_percent: Decimal::ZERO,
        fixed_bills: Vec::new(),
        allocations: Vec::new(),
    };
    let summary = compute(&plan, &[]);
    assert_eq!(summary.variable_budget, Decimal::ZERO);
    assert!(summary.lines.is_empty());
    assert!(summary.buckets.is_empty());
    assert!(!summary.can_save());
}

// ── Laws ──────────────────────────────────────────────────────

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn percent_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn plan_strategy() -> impl Strategy<Value = Plan> {
    (
        amount_strategy(),
        percent_strategy(),
        prop::collection::vec(amount_strategy(), 0..6),
        prop::collection::vec((percent_strategy(), 1u8..=10), 0..6),
    )
        .prop_map(|(income, saving_percent, bills, allocs)| Plan {
            month: "2026-02".into(),
            income,
            saving_percent,
            fixed_bills: bills
                .into_iter()
                .enumerate()
                .map(|(i, amount)| bill(i as u64, &format!("bill-{i}"), amount))
                .collect(),
            allocations: allocs
                .into_iter()
                .enumerate()
                .map(|(i, (percent, priority))| {
                    Allocation::new(&format!("a{i}"), &format!("cat-{i}"), percent, priority)
                })
                .collect(),
        })
}

fn ledger_strategy() -> impl Strategy<Value = Vec<Transaction>> {
    prop::collection::vec((0usize..8, any::<bool>(), amount_strategy()), 0..12).prop_map(
        |rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (cat, is_income, amount))| {
                    let kind = if is_income {
                        TxnType::Income
                    } else {
                        TxnType::Expense
                    };
                    txn(i as u64, &format!("cat-{cat}"), kind, amount)
                })
                .collect()
        },
    )
}

#[test]
fn test_extreme_amounts_saturate() {
    let mut plan = sample_plan();
    plan.income = Decimal::MAX;
    plan.fixed_bills.push(bill(3, "Yacht", Decimal::MAX));
    plan.fixed_bills.push(bill(4, "Jet", Decimal::MAX));
    let txns = [
        expense(1, "Courses", Decimal::MAX),
        expense(2, "Courses", Decimal::MAX),
        txn(3, "Salaire", TxnType::Income, Decimal::MAX),
        txn(4, "Prime", TxnType::Income, Decimal::MAX),
    ];

    let summary = compute(&plan, &txns);
    assert_eq!(summary.fixed_total, Decimal::MAX);
    assert_eq!(summary.total_spent, Decimal::MAX);
    assert_eq!(summary.total_income, Decimal::MAX);
    assert!(summary.is_impossible());
    assert!(summary.is_over_budget());
    assert!(summary.lines.iter().all(|l| l.planned.is_zero()));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_variable_budget_formula(plan in plan_strategy()) {
        let summary = compute(&plan, &[]);
        let bills: Decimal = plan.fixed_bills.iter().map(|b| b.amount).sum();
        let expected = plan.income - plan.income * plan.saving_percent / dec!(100) - bills;
        prop_assert_eq!(summary.variable_budget, expected);
    }

    #[test]
    fn prop_impossible_iff_negative(plan in plan_strategy()) {
        let summary = compute(&plan, &[]);
        prop_assert_eq!(summary.is_impossible(), summary.variable_budget < Decimal::ZERO);
    }

    #[test]
    fn prop_compute_is_idempotent(plan in plan_strategy(), txns in ledger_strategy()) {
        prop_assert_eq!(compute(&plan, &txns), compute(&plan, &txns));
    }

    #[test]
    fn prop_buckets_account_for_all_spending(plan in plan_strategy(), txns in ledger_strategy()) {
        let summary = compute(&plan, &txns);
        let bucketed: Decimal = summary.buckets.iter().map(|b| b.value).sum();
        prop_assert_eq!(bucketed, summary.total_spent);
        prop_assert_eq!(summary.remaining, summary.variable_budget - summary.total_spent);
    }

    #[test]
    fn prop_planned_never_negative(plan in plan_strategy()) {
        let summary = compute(&plan, &[]);
        for l in &summary.lines {
            prop_assert!(l.planned >= Decimal::ZERO);
            prop_assert!(l.progress >= Decimal::ZERO);
        }
    }
}
