mod id;
mod plan;
mod transaction;

pub use id::{BillId, TxnId};
pub use plan::{Allocation, FixedBill, Plan};
pub use transaction::{Transaction, TxnType, TypeFilter};
