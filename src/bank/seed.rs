//! Initial-account configuration. Seeding is an explicit bootstrap
//! step owned by the process entry point, not by the ledger itself.
use serde::Deserialize;

use crate::bank::types::{AccountId, DECIMAL_PRECISION, Money, Pin};

/// Custom deserializer for monetary values to handle fixed-point representation.
fn deserialize_money<'de, D>(deserializer: D) -> Result<Money, D::Error>
where
    D: serde::de::Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    Ok((value * DECIMAL_PRECISION).round() as Money)
}

/// One row of the initial-accounts configuration.
#[derive(Debug, Deserialize)]
pub struct AccountSeed {
    /// The unique identifier for the account.
    pub id: AccountId,

    /// The card number protecting the account.
    #[serde(rename = "card")]
    pub card_number: String,

    /// The PIN paired with the card number.
    pub pin: Pin,

    /// The opening balance, given in currency units.
    #[serde(deserialize_with = "deserialize_money")]
    pub balance: Money,
}

/// Reads an initial-accounts configuration from a CSV file with the
/// header `id,card,pin,balance`.
pub fn load_seeds(path: &str) -> Result<Vec<AccountSeed>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    reader.deserialize().collect()
}

/// The built-in demo configuration: two accounts with known cards.
pub fn demo_seeds() -> Vec<AccountSeed> {
    vec![
        AccountSeed {
            id: 1,
            card_number: "111111".to_string(),
            pin: 1111,
            balance: 2000 * DECIMAL_PRECISION as Money,
        },
        AccountSeed {
            id: 2,
            card_number: "222222".to_string(),
            pin: 2222,
            balance: 6000 * DECIMAL_PRECISION as Money,
        },
    ]
}
