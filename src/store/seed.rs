use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use super::State;
use crate::input::{self, InputError};
use crate::models::{Allocation, BillId, FixedBill, Plan, Transaction, TxnId, TxnType};

/// The starting plan and ledger for `month` ("YYYY-MM").
pub fn demo_state(month: &str) -> Result<State, InputError> {
    let first_day = input::parse_month(month)?;

    let plan = Plan {
        month: first_day.format("%Y-%m").to_string(),
        income: Decimal::from(2200),
        saving_percent: Decimal::from(10),
        fixed_bills: vec![
            bill(1, "Loyer", 750),
            bill(2, "Abonnements", 35),
            bill(3, "Téléphone", 15),
        ],
        allocations: vec![
            Allocation::new("groceries", "Courses", Decimal::from(45), 1),
            Allocation::new("outings", "Sorties", Decimal::from(25), 2),
            Allocation::new("transport", "Transport", Decimal::from(15), 3),
            Allocation::new("health", "Santé", Decimal::from(10), 4),
            Allocation::new("other", "Autres", Decimal::from(5), 5),
        ],
    };

    let transactions = vec![
        txn(4, first_day, 0, "Salaire", TxnType::Income, 2200),
        txn(5, first_day, 2, "Courses", TxnType::Expense, 260),
        txn(6, first_day, 5, "Sorties", TxnType::Expense, 140),
        txn(7, first_day, 8, "Transport", TxnType::Expense, 70),
        txn(8, first_day, 11, "Santé", TxnType::Expense, 40),
        txn(9, first_day, 14, "Autres", TxnType::Expense, 100),
    ];

    Ok(State::new(plan, transactions))
}

fn bill(id: u64, name: &str, amount: i64) -> FixedBill {
    FixedBill {
        id: BillId(id),
        name: name.to_string(),
        amount: Decimal::from(amount),
    }
}

fn txn(
    id: u64,
    first_day: NaiveDate,
    offset: u64,
    category: &str,
    txn_type: TxnType,
    amount: i64,
) -> Transaction {
    Transaction {
        id: TxnId(id),
        date: first_day
            .checked_add_days(Days::new(offset))
            .unwrap_or(first_day),
        category: category.to_string(),
        txn_type,
        amount: Decimal::from(amount),
    }
}
