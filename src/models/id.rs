//! Typed ids for in-memory records.
//!
//! Ids are handed out by the state snapshot from a monotonically increasing
//! counter, so they stay unique for the lifetime of the process.

macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

typed_id!(BillId, "Identifier of a fixed bill.");
typed_id!(TxnId, "Identifier of a ledger transaction.");
