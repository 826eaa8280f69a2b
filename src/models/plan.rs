use rust_decimal::Decimal;

use super::BillId;

/// A recurring fixed expense paid every month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedBill {
    pub id: BillId,
    pub name: String,
    pub amount: Decimal,
}

/// A named percentage share of the variable budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub id: String,
    pub name: String,
    /// 0..=100
    pub percent: Decimal,
    /// 1..=10, lower comes first
    pub priority: u8,
}

impl Allocation {
    pub fn new(id: &str, name: &str, percent: Decimal, priority: u8) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            percent,
            priority,
        }
    }
}

/// The user's monthly budgeting intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// Format: "YYYY-MM"
    pub month: String,
    pub income: Decimal,
    pub saving_percent: Decimal,
    pub fixed_bills: Vec<FixedBill>,
    pub allocations: Vec<Allocation>,
}

impl Plan {
    /// Allocations ordered by ascending priority. Ties keep their plan order.
    pub fn allocations_by_priority(&self) -> Vec<&Allocation> {
        let mut sorted: Vec<&Allocation> = self.allocations.iter().collect();
        sorted.sort_by_key(|a| a.priority);
        sorted
    }

    /// Find an allocation by exact (case-sensitive) name.
    pub fn find_allocation(&self, name: &str) -> Option<&Allocation> {
        self.allocations.iter().find(|a| a.name == name)
    }

    pub fn find_bill(&self, id: BillId) -> Option<&FixedBill> {
        self.fixed_bills.iter().find(|b| b.id == id)
    }
}
