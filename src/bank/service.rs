//! Command loop serializing all ledger access.
//!
//! The `LedgerService` owns the `Ledger` and applies one command at a
//! time, so concurrent sessions can never interleave mutations against
//! the same account (or the same pair, for transfers) and the
//! non-negative-balance invariant holds at every observable point.
use log::{debug, warn};
use tokio::sync::{mpsc, oneshot};

use crate::bank::{
    Ledger, LedgerError, Transaction,
    types::{AccountId, Money, Pin},
};

/// The size of the channel for ledger commands.
const CHANNEL_SIZE: usize = 100;

/// A request for one ledger operation, carrying its reply channel.
pub enum Command {
    Authenticate {
        card_number: String,
        pin: Pin,
        reply: oneshot::Sender<Option<AccountId>>,
    },
    Balance {
        account: AccountId,
        reply: oneshot::Sender<Result<Money, LedgerError>>,
    },
    Withdraw {
        account: AccountId,
        amount: Money,
        reply: oneshot::Sender<Result<(), LedgerError>>,
    },
    Deposit {
        account: AccountId,
        amount: Money,
        reply: oneshot::Sender<Result<(), LedgerError>>,
    },
    Transfer {
        from: AccountId,
        to: AccountId,
        amount: Money,
        reply: oneshot::Sender<Result<(), LedgerError>>,
    },
    History {
        account: AccountId,
        reply: oneshot::Sender<Result<Option<Vec<Transaction>>, LedgerError>>,
    },
}

/// Cloneable handle through which sessions talk to the ledger.
#[derive(Clone)]
pub struct LedgerHandle {
    sender: mpsc::Sender<Command>,
}

impl LedgerHandle {
    async fn send(&self, command: Command) -> Result<(), LedgerError> {
        self.sender
            .send(command)
            .await
            .map_err(|_| LedgerError::ServiceClosed)
    }

    pub async fn authenticate(
        &self,
        card_number: &str,
        pin: Pin,
    ) -> Result<Option<AccountId>, LedgerError> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Authenticate {
            card_number: card_number.to_string(),
            pin,
            reply,
        })
        .await?;
        response.await.map_err(|_| LedgerError::ServiceClosed)
    }

    pub async fn balance(&self, account: AccountId) -> Result<Money, LedgerError> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Balance { account, reply }).await?;
        response.await.map_err(|_| LedgerError::ServiceClosed)?
    }

    pub async fn withdraw(&self, account: AccountId, amount: Money) -> Result<(), LedgerError> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Withdraw {
            account,
            amount,
            reply,
        })
        .await?;
        response.await.map_err(|_| LedgerError::ServiceClosed)?
    }

    pub async fn deposit(&self, account: AccountId, amount: Money) -> Result<(), LedgerError> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Deposit {
            account,
            amount,
            reply,
        })
        .await?;
        response.await.map_err(|_| LedgerError::ServiceClosed)?
    }

    pub async fn transfer(
        &self,
        from: AccountId,
        to: AccountId,
        amount: Money,
    ) -> Result<(), LedgerError> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Transfer {
            from,
            to,
            amount,
            reply,
        })
        .await?;
        response.await.map_err(|_| LedgerError::ServiceClosed)?
    }

    pub async fn history(
        &self,
        account: AccountId,
    ) -> Result<Option<Vec<Transaction>>, LedgerError> {
        let (reply, response) = oneshot::channel();
        self.send(Command::History { account, reply }).await?;
        response.await.map_err(|_| LedgerError::ServiceClosed)?
    }
}

/// Owns the ledger and processes commands until every handle is gone.
pub struct LedgerService {
    ledger: Ledger,
    receiver: mpsc::Receiver<Command>,
}

impl LedgerService {
    /// Wraps a ledger in a service, returning the handle to drive it.
    pub fn new(ledger: Ledger) -> (LedgerHandle, Self) {
        let (sender, receiver) = mpsc::channel(CHANNEL_SIZE);
        (LedgerHandle { sender }, LedgerService { ledger, receiver })
    }

    /// Runs the command loop, returning the final ledger state once all
    /// handles have been dropped.
    pub async fn run(mut self) -> Ledger {
        while let Some(command) = self.receiver.recv().await {
            self.apply(command);
        }
        debug!("all handles dropped, ledger service stopping");
        self.ledger
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::Authenticate {
                card_number,
                pin,
                reply,
            } => {
                let outcome = self.ledger.authenticate(&card_number, pin);
                if outcome.is_none() {
                    warn!("authentication failed for card {card_number}");
                }
                let _ = reply.send(outcome);
            }
            Command::Balance { account, reply } => {
                let _ = reply.send(self.ledger.balance_of(account));
            }
            Command::Withdraw {
                account,
                amount,
                reply,
            } => {
                let outcome = self.ledger.withdraw(account, amount);
                if let Err(ref err) = outcome {
                    warn!("withdraw of {amount} from account {account} failed: {err}");
                }
                let _ = reply.send(outcome);
            }
            Command::Deposit {
                account,
                amount,
                reply,
            } => {
                let outcome = self.ledger.deposit(account, amount);
                if let Err(ref err) = outcome {
                    warn!("deposit of {amount} to account {account} failed: {err}");
                }
                let _ = reply.send(outcome);
            }
            Command::Transfer {
                from,
                to,
                amount,
                reply,
            } => {
                let outcome = self.ledger.transfer(from, to, amount);
                if let Err(ref err) = outcome {
                    warn!("transfer of {amount} from {from} to {to} failed: {err}");
                }
                let _ = reply.send(outcome);
            }
            Command::History { account, reply } => {
                let outcome = self
                    .ledger
                    .history_of(account)
                    .map(|history| history.map(<[Transaction]>::to_vec));
                let _ = reply.send(outcome);
            }
        }
    }
}
