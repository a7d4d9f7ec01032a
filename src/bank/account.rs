//! Account state and the validation rules for balance mutations.
use thiserror::Error;

use crate::bank::{
    Card, Transaction, TransactionKind,
    types::{AccountId, Money, Pin},
};

/// A balance-holding entity protected by a card credential.
///
/// The balance never goes negative: every mutation is validated before
/// any state changes, and a transaction record is appended only when a
/// mutation succeeds. Failed attempts leave no trace.
#[derive(Debug)]
pub struct Account {
    /// The unique identifier for the account.
    id: AccountId,

    /// The current balance, always >= 0.
    balance: Money,

    /// The credential protecting this account.
    card: Card,

    /// Append-only history of successful mutations, in insertion order.
    transactions: Vec<Transaction>,
}

impl Account {
    /// Creates an account with an opening balance. The caller validates
    /// that the opening balance is non-negative (see `Ledger::bootstrap`).
    pub fn new(id: AccountId, card: Card, balance: Money) -> Self {
        Account {
            id,
            balance,
            card,
            transactions: Vec::new(),
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Checks the given credentials against this account's card.
    /// Side-effect free; attempt counting belongs to the session layer.
    pub fn authenticate(&self, card_number: &str, pin: Pin) -> bool {
        self.card.verify(card_number, pin)
    }

    /// Withdraws the given amount. Fails without touching any state when
    /// the amount is not positive or exceeds the balance.
    pub fn withdraw(&mut self, amount: Money) -> Result<(), LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount);
        }
        if amount > self.balance {
            return Err(LedgerError::InsufficientFunds);
        }
        self.balance -= amount;
        self.transactions
            .push(Transaction::new(TransactionKind::Withdraw, amount));
        Ok(())
    }

    /// Deposits the given amount. Fails without touching any state when
    /// the amount is not positive or would overflow the balance.
    pub fn deposit(&mut self, amount: Money) -> Result<(), LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount);
        }
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.transactions
            .push(Transaction::new(TransactionKind::Deposit, amount));
        Ok(())
    }

    /// Reverses a withdrawal that just succeeded, restoring the balance
    /// and dropping its record. Only `Ledger::transfer` uses this, to
    /// stay all-or-nothing if the deposit leg ever fails.
    pub(crate) fn undo_withdraw(&mut self, amount: Money) {
        self.balance += amount;
        self.transactions.pop();
    }

    /// Returns the full history in insertion order, or `None` when there
    /// are no transactions yet.
    pub fn history(&self) -> Option<&[Transaction]> {
        if self.transactions.is_empty() {
            None
        } else {
            Some(&self.transactions)
        }
    }
}

/// Errors reported by ledger operations. All of them leave the ledger
/// unchanged; none is fatal to the process.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LedgerError {
    #[error("amount must be positive")]
    InvalidAmount,
    #[error("insufficient funds")]
    InsufficientFunds,
    #[error("balance overflow")]
    Overflow,
    #[error("unknown account {0}")]
    UnknownAccount(AccountId),
    #[error("account {0} already exists")]
    DuplicateAccount(AccountId),
    #[error("ledger service is no longer running")]
    ServiceClosed,
}
