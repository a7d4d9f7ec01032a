//! Ledger core: cards, accounts, transactions, and the operations that
//! span accounts.
mod account;
mod card;
mod ledger;
mod seed;
mod service;
mod transaction;
mod types;

pub use account::*;
pub use card::*;
pub use ledger::*;
pub use seed::*;
pub use service::*;
pub use transaction::*;
pub use types::*;
