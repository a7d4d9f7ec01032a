//! Interactive session controller: login, menu loop, prompt handling.
//! A thin wrapper over the ledger service; all validation and state
//! live behind the `LedgerHandle`.
use std::error::Error;
use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::bank::{AccountId, LedgerHandle, Money, Pin, format_money, parse_money};

/// Failed logins allowed before the session locks. Session policy only;
/// the ledger itself keeps no attempt state.
const MAX_LOGIN_ATTEMPTS: u32 = 3;

type Input = Lines<BufReader<Stdin>>;

pub struct Atm {
    ledger: LedgerHandle,
}

impl Atm {
    pub fn new(ledger: LedgerHandle) -> Self {
        Atm { ledger }
    }

    /// Drives one full session: login, then the menu until logout or
    /// end of input.
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        let mut input = BufReader::new(tokio::io::stdin()).lines();

        let Some(account) = self.login(&mut input).await? else {
            println!("Session locked.");
            return Ok(());
        };

        loop {
            show_menu()?;
            let Some(choice) = input.next_line().await? else {
                break;
            };
            match choice.trim() {
                "1" => {
                    let balance = self.ledger.balance(account).await?;
                    println!("Balance: {}", format_money(balance));
                }
                "2" => {
                    let Some(amount) = prompt_amount(&mut input).await? else {
                        continue;
                    };
                    match self.ledger.withdraw(account, amount).await {
                        Ok(()) => println!("Success"),
                        Err(err) => println!("Failed: {err}"),
                    }
                }
                "3" => {
                    let Some(amount) = prompt_amount(&mut input).await? else {
                        continue;
                    };
                    match self.ledger.deposit(account, amount).await {
                        Ok(()) => println!("Success"),
                        Err(err) => println!("Failed: {err}"),
                    }
                }
                "4" => {
                    prompt("Transfer to account ID: ")?;
                    let Some(line) = input.next_line().await? else {
                        break;
                    };
                    let Ok(to) = line.trim().parse::<AccountId>() else {
                        println!("Invalid account ID.");
                        continue;
                    };
                    let Some(amount) = prompt_amount(&mut input).await? else {
                        continue;
                    };
                    match self.ledger.transfer(account, to, amount).await {
                        Ok(()) => println!("Success"),
                        Err(err) => println!("Failed: {err}"),
                    }
                }
                "5" => match self.ledger.history(account).await? {
                    Some(transactions) => {
                        for t in transactions {
                            println!(
                                "{} | Amount: {} | Time: {}",
                                t.get_kind(),
                                format_money(t.get_amount()),
                                t.get_timestamp().format("%Y-%m-%d %H:%M:%S UTC")
                            );
                        }
                    }
                    None => println!("No transactions yet."),
                },
                "6" => {
                    println!("Logged out.");
                    break;
                }
                _ => println!("Invalid choice."),
            }
        }
        Ok(())
    }

    /// Prompts for credentials, giving up after `MAX_LOGIN_ATTEMPTS`
    /// failures or at end of input.
    async fn login(&self, input: &mut Input) -> Result<Option<AccountId>, Box<dyn Error>> {
        for _ in 0..MAX_LOGIN_ATTEMPTS {
            prompt("Enter card number: ")?;
            let Some(card_number) = input.next_line().await? else {
                return Ok(None);
            };
            prompt("Enter PIN: ")?;
            let Some(pin_line) = input.next_line().await? else {
                return Ok(None);
            };
            if let Ok(pin) = pin_line.trim().parse::<Pin>() {
                if let Some(account) = self.ledger.authenticate(card_number.trim(), pin).await? {
                    println!("Login successful.");
                    return Ok(Some(account));
                }
            }
            println!("Invalid credentials.");
        }
        Ok(None)
    }
}

fn prompt(text: &str) -> std::io::Result<()> {
    print!("{text}");
    std::io::stdout().flush()
}

fn show_menu() -> std::io::Result<()> {
    println!("\n--- ATM Menu ---");
    println!("1. Balance");
    println!("2. Withdraw");
    println!("3. Deposit");
    println!("4. Transfer");
    println!("5. Transactions");
    println!("6. Logout");
    prompt("Choose: ")
}

async fn prompt_amount(input: &mut Input) -> Result<Option<Money>, Box<dyn Error>> {
    prompt("Amount: ")?;
    let Some(line) = input.next_line().await? else {
        return Ok(None);
    };
    match parse_money(&line) {
        Some(amount) => Ok(Some(amount)),
        None => {
            println!("Invalid amount.");
            Ok(None)
        }
    }
}
