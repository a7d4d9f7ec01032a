//! The `Ledger` owns every account and the operations that span more
//! than one of them: credential lookup and inter-account transfer.
use std::collections::HashMap;

use crate::bank::{
    Account, AccountSeed, Card, LedgerError, Transaction,
    types::{AccountId, Money, Pin},
};

/// The collection of all accounts, keyed by id.
///
/// Accounts are owned exclusively by the ledger; callers hold opaque
/// `AccountId`s and re-resolve them on every operation.
#[derive(Debug)]
pub struct Ledger {
    accounts: HashMap<AccountId, Account>,
}

impl Ledger {
    /// Builds a ledger from an initial account configuration.
    /// Rejects duplicate ids and negative opening balances.
    pub fn bootstrap(
        seeds: impl IntoIterator<Item = AccountSeed>,
    ) -> Result<Self, LedgerError> {
        let mut accounts = HashMap::new();
        for seed in seeds {
            if seed.balance < 0 {
                return Err(LedgerError::InvalidAmount);
            }
            if accounts.contains_key(&seed.id) {
                return Err(LedgerError::DuplicateAccount(seed.id));
            }
            let card = Card::new(seed.card_number, seed.pin);
            accounts.insert(seed.id, Account::new(seed.id, card, seed.balance));
        }
        Ok(Ledger { accounts })
    }

    /// Retrieves an account by id.
    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get(&id)
    }

    /// Retrieves all accounts in the ledger.
    pub fn accounts(&self) -> &HashMap<AccountId, Account> {
        &self.accounts
    }

    /// Finds the account matching the given credentials and returns its
    /// id, or `None` on a mismatch. Stateless: no attempt counters live
    /// here. Which account wins if two ever shared credentials is not a
    /// contract; ids are unique and credentials are expected distinct.
    pub fn authenticate(&self, card_number: &str, pin: Pin) -> Option<AccountId> {
        self.accounts
            .values()
            .find(|account| account.authenticate(card_number, pin))
            .map(Account::id)
    }

    /// Returns the current balance of the given account.
    pub fn balance_of(&self, id: AccountId) -> Result<Money, LedgerError> {
        self.accounts
            .get(&id)
            .map(Account::balance)
            .ok_or(LedgerError::UnknownAccount(id))
    }

    /// Withdraws from the given account.
    pub fn withdraw(&mut self, id: AccountId, amount: Money) -> Result<(), LedgerError> {
        self.accounts
            .get_mut(&id)
            .ok_or(LedgerError::UnknownAccount(id))?
            .withdraw(amount)
    }

    /// Deposits into the given account.
    pub fn deposit(&mut self, id: AccountId, amount: Money) -> Result<(), LedgerError> {
        self.accounts
            .get_mut(&id)
            .ok_or(LedgerError::UnknownAccount(id))?
            .deposit(amount)
    }

    /// Returns the transaction history of the given account, `None`
    /// meaning no transactions yet.
    pub fn history_of(&self, id: AccountId) -> Result<Option<&[Transaction]>, LedgerError> {
        self.accounts
            .get(&id)
            .map(Account::history)
            .ok_or(LedgerError::UnknownAccount(id))
    }

    /// Moves `amount` from one account to another, all-or-nothing: both
    /// balances change together or neither does.
    ///
    /// Transfers from an account to itself are allowed; they net to no
    /// balance change but record a withdraw and a deposit.
    pub fn transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Money,
    ) -> Result<(), LedgerError> {
        if !self.accounts.contains_key(&to) {
            return Err(LedgerError::UnknownAccount(to));
        }
        self.accounts
            .get_mut(&from)
            .ok_or(LedgerError::UnknownAccount(from))?
            .withdraw(amount)?;

        // The destination was resolved above and the amount already
        // passed withdraw's positivity check, so the deposit can only
        // fail if it would overflow the destination balance. Put the
        // money back in that case so no partial transfer is observable.
        let deposited = match self.accounts.get_mut(&to) {
            Some(destination) => destination.deposit(amount),
            None => Err(LedgerError::UnknownAccount(to)),
        };
        if let Err(err) = deposited {
            if let Some(source) = self.accounts.get_mut(&from) {
                source.undo_withdraw(amount);
            }
            return Err(err);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::{TransactionKind, demo_seeds, types::DECIMAL_PRECISION};

    const UNIT: Money = DECIMAL_PRECISION as Money;

    fn demo_ledger() -> Ledger {
        Ledger::bootstrap(demo_seeds()).unwrap()
    }

    #[test]
    fn test_bootstrap_demo_accounts() {
        let ledger = demo_ledger();
        assert_eq!(ledger.accounts().len(), 2);
        assert_eq!(ledger.balance_of(1).unwrap(), 2000 * UNIT);
        assert_eq!(ledger.balance_of(2).unwrap(), 6000 * UNIT);
    }

    #[test]
    fn test_bootstrap_duplicate_id() {
        let mut seeds = demo_seeds();
        seeds[1].id = seeds[0].id;
        assert_eq!(
            Ledger::bootstrap(seeds).unwrap_err(),
            LedgerError::DuplicateAccount(1)
        );
    }

    #[test]
    fn test_bootstrap_negative_balance() {
        let mut seeds = demo_seeds();
        seeds[0].balance = -1;
        assert_eq!(
            Ledger::bootstrap(seeds).unwrap_err(),
            LedgerError::InvalidAmount
        );
    }

    #[test]
    fn test_authenticate() {
        let ledger = demo_ledger();
        assert_eq!(ledger.authenticate("111111", 1111), Some(1));
        assert_eq!(ledger.authenticate("222222", 2222), Some(2));
        assert_eq!(ledger.authenticate("111111", 9999), None);
        assert_eq!(ledger.authenticate("999999", 1111), None);
    }

    #[test]
    fn test_transfer() {
        let mut ledger = demo_ledger();
        assert!(ledger.transfer(1, 2, 500 * UNIT).is_ok());
        assert_eq!(ledger.balance_of(1).unwrap(), 1500 * UNIT);
        assert_eq!(ledger.balance_of(2).unwrap(), 6500 * UNIT);
        assert_eq!(ledger.history_of(1).unwrap().unwrap().len(), 1);
        assert_eq!(ledger.history_of(2).unwrap().unwrap().len(), 1);
    }

    #[test]
    fn test_transfer_insufficient_funds() {
        let mut ledger = demo_ledger();
        assert_eq!(
            ledger.transfer(1, 2, 3000 * UNIT),
            Err(LedgerError::InsufficientFunds)
        );
        assert_eq!(ledger.balance_of(1).unwrap(), 2000 * UNIT);
        assert_eq!(ledger.balance_of(2).unwrap(), 6000 * UNIT);
        assert!(ledger.history_of(1).unwrap().is_none());
        assert!(ledger.history_of(2).unwrap().is_none());
    }

    #[test]
    fn test_transfer_unknown_accounts() {
        let mut ledger = demo_ledger();
        assert_eq!(
            ledger.transfer(9, 2, 100),
            Err(LedgerError::UnknownAccount(9))
        );
        assert_eq!(
            ledger.transfer(1, 9, 100),
            Err(LedgerError::UnknownAccount(9))
        );
        assert_eq!(ledger.balance_of(1).unwrap(), 2000 * UNIT);
        assert_eq!(ledger.balance_of(2).unwrap(), 6000 * UNIT);
    }

    #[test]
    fn test_transfer_non_positive_amount() {
        let mut ledger = demo_ledger();
        assert_eq!(ledger.transfer(1, 2, 0), Err(LedgerError::InvalidAmount));
        assert_eq!(ledger.transfer(1, 2, -5), Err(LedgerError::InvalidAmount));
        assert_eq!(ledger.balance_of(1).unwrap(), 2000 * UNIT);
        assert_eq!(ledger.balance_of(2).unwrap(), 6000 * UNIT);
    }

    #[test]
    fn test_transfer_overflowing_destination_restores_source() {
        let seeds = vec![
            AccountSeed {
                id: 1,
                card_number: "111111".to_string(),
                pin: 1111,
                balance: Money::MAX,
            },
            AccountSeed {
                id: 2,
                card_number: "222222".to_string(),
                pin: 2222,
                balance: Money::MAX,
            },
        ];
        let mut ledger = Ledger::bootstrap(seeds).unwrap();
        assert_eq!(
            ledger.transfer(1, 2, Money::MAX),
            Err(LedgerError::Overflow)
        );
        assert_eq!(ledger.balance_of(1).unwrap(), Money::MAX);
        assert_eq!(ledger.balance_of(2).unwrap(), Money::MAX);
        assert!(ledger.history_of(1).unwrap().is_none());
        assert!(ledger.history_of(2).unwrap().is_none());
    }

    #[test]
    fn test_transfer_to_self() {
        let mut ledger = demo_ledger();
        assert!(ledger.transfer(1, 1, 100 * UNIT).is_ok());
        assert_eq!(ledger.balance_of(1).unwrap(), 2000 * UNIT);
        let kinds: Vec<_> = ledger
            .history_of(1)
            .unwrap()
            .unwrap()
            .iter()
            .map(|t| t.get_kind())
            .collect();
        assert_eq!(
            kinds,
            vec![TransactionKind::Withdraw, TransactionKind::Deposit]
        );
    }

    #[test]
    fn test_session_scenario() {
        let mut ledger = demo_ledger();
        assert!(ledger.transfer(1, 2, 500 * UNIT).is_ok());
        assert_eq!(ledger.balance_of(1).unwrap(), 1500 * UNIT);
        assert_eq!(ledger.balance_of(2).unwrap(), 6500 * UNIT);

        assert_eq!(
            ledger.withdraw(1, 2000 * UNIT),
            Err(LedgerError::InsufficientFunds)
        );
        assert_eq!(ledger.balance_of(1).unwrap(), 1500 * UNIT);

        assert!(ledger.deposit(1, 100 * UNIT).is_ok());
        assert_eq!(ledger.balance_of(1).unwrap(), 1600 * UNIT);

        // The failed withdrawal leaves no record.
        let kinds: Vec<_> = ledger
            .history_of(1)
            .unwrap()
            .unwrap()
            .iter()
            .map(|t| t.get_kind())
            .collect();
        assert_eq!(
            kinds,
            vec![TransactionKind::Withdraw, TransactionKind::Deposit]
        );
    }
}
