//! Transaction records: immutable facts of successful balance mutations.
use chrono::{DateTime, Utc};

use crate::bank::types::Money;

/// Enum representing the kind of balance mutation a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Withdraw,
    Deposit,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Withdraw => write!(f, "Withdraw"),
            TransactionKind::Deposit => write!(f, "Deposit"),
        }
    }
}

/// A single ledger movement. Created exactly once, when a mutation
/// succeeds, and never edited or deleted afterward.
#[derive(Debug, Clone)]
pub struct Transaction {
    kind: TransactionKind,
    amount: Money,
    timestamp: DateTime<Utc>,
}

impl Transaction {
    /// Creates a record for a mutation that just succeeded, stamping it
    /// with the current time.
    pub fn new(kind: TransactionKind, amount: Money) -> Self {
        Transaction {
            kind,
            amount,
            timestamp: Utc::now(),
        }
    }

    pub fn get_kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn get_amount(&self) -> Money {
        self.amount
    }

    pub fn get_timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
