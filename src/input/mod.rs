//! Boundary between raw user text and the typed state.
//!
//! Numeric fields never fail: anything unparsable becomes 0 and values are
//! clamped into range. Form submissions (a new bill, a new transaction) are
//! validated as a whole and rejected with an [`InputError`] instead.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::TxnType;

pub(crate) const MIN_PRIORITY: u8 = 1;
pub(crate) const MAX_PRIORITY: u8 = 10;

/// Largest amount (10^12) accepted for income, bills and transactions.
pub(crate) const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("amount exceeds the maximum of 1000000000000")]
    AmountTooLarge,
    #[error("amount must be greater than zero")]
    NonPositiveAmount,
    #[error("invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("invalid type: {0} (expected income or expense)")]
    InvalidType(String),
    #[error("invalid month: {0} (expected YYYY-MM)")]
    InvalidMonth(String),
}

/// Parse a number, coercing anything unparsable to zero.
pub fn coerce_number(raw: &str) -> Decimal {
    parse_decimal(raw).unwrap_or(Decimal::ZERO)
}

/// True when `raw` reads as a number at all.
pub fn is_number(raw: &str) -> bool {
    parse_decimal(raw).is_some()
}

/// Clamp an amount into `0..=MAX_AMOUNT`.
pub fn clamp_amount(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, MAX_AMOUNT)
}

/// Clamp a percentage into `0..=100`.
pub fn clamp_percent(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

/// Clamp a priority into `1..=10`.
pub fn clamp_priority(value: i64) -> u8 {
    // Fits in u8 after clamping.
    value.clamp(i64::from(MIN_PRIORITY), i64::from(MAX_PRIORITY)) as u8
}

/// Monthly income field, clamped into `0..=MAX_AMOUNT`.
pub fn parse_income(raw: &str) -> Decimal {
    clamp_amount(coerce_number(raw))
}

pub fn parse_percent(raw: &str) -> Decimal {
    clamp_percent(coerce_number(raw))
}

/// Priority field. Unparsable input falls back to the highest priority (1),
/// fractions are truncated.
pub fn parse_priority(raw: &str) -> u8 {
    match parse_decimal(raw) {
        Some(d) => {
            let saturated = if d.is_sign_negative() {
                i64::MIN
            } else {
                i64::MAX
            };
            clamp_priority(d.trunc().to_i64().unwrap_or(saturated))
        }
        None => MIN_PRIORITY,
    }
}

/// Editing an existing bill amount: coerced and clamped like income.
pub fn parse_bill_amount(raw: &str) -> Decimal {
    clamp_amount(coerce_number(raw))
}

/// Validate a `YYYY-MM` month key and return its first day.
pub fn parse_month(raw: &str) -> Result<NaiveDate, InputError> {
    let raw = raw.trim();
    if raw.len() != 7 {
        return Err(InputError::InvalidMonth(raw.to_string()));
    }
    NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d")
        .map_err(|_| InputError::InvalidMonth(raw.to_string()))
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, InputError> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| InputError::InvalidDate(raw.to_string()))
}

/// A validated "add bill" submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBill {
    pub name: String,
    pub amount: Decimal,
}

impl NewBill {
    /// Name is trimmed and required; amount must parse and be `>= 0`.
    pub fn parse(name: &str, amount: &str) -> Result<Self, InputError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(InputError::Missing("bill name"));
        }
        let amount = parse_decimal(amount)
            .ok_or_else(|| InputError::InvalidAmount(amount.trim().to_string()))?;
        if amount < Decimal::ZERO {
            return Err(InputError::InvalidAmount(amount.to_string()));
        }
        if amount > MAX_AMOUNT {
            return Err(InputError::AmountTooLarge);
        }
        Ok(Self {
            name: name.to_string(),
            amount,
        })
    }
}

/// A validated "add transaction" submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub category: String,
    pub txn_type: TxnType,
    pub amount: Decimal,
}

impl NewTransaction {
    /// Category is kept as typed apart from surrounding whitespace; it has to
    /// match an allocation name exactly to be reconciled.
    pub fn parse(
        date: &str,
        txn_type: &str,
        amount: &str,
        category: &str,
    ) -> Result<Self, InputError> {
        let date = parse_date(date)?;
        let txn_type = TxnType::parse(txn_type)
            .ok_or_else(|| InputError::InvalidType(txn_type.trim().to_string()))?;
        let amount = parse_decimal(amount)
            .ok_or_else(|| InputError::InvalidAmount(amount.trim().to_string()))?;
        if amount <= Decimal::ZERO {
            return Err(InputError::NonPositiveAmount);
        }
        if amount > MAX_AMOUNT {
            return Err(InputError::AmountTooLarge);
        }
        let category = category.trim();
        if category.is_empty() {
            return Err(InputError::Missing("category"));
        }
        Ok(Self {
            date,
            category: category.to_string(),
            txn_type,
            amount,
        })
    }
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw).ok()
}
