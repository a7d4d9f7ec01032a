//! Card credentials used to authenticate against an account.
use crate::bank::types::Pin;

/// A card number and PIN pair. Immutable after construction.
///
/// Verification is a plain equality check; attempt counting and lockout
/// are session-controller policy and never live here.
#[derive(Debug, Clone)]
pub struct Card {
    number: String,
    pin: Pin,
}

impl Card {
    pub fn new(number: String, pin: Pin) -> Self {
        Card { number, pin }
    }

    /// Returns true iff both the card number and the PIN match exactly.
    pub fn verify(&self, number: &str, pin: Pin) -> bool {
        self.number == number && self.pin == pin
    }
}

#[cfg(test)]
mod tests {
    use super::Card;

    #[test]
    fn test_verify_match() {
        let card = Card::new("111111".to_string(), 1111);
        assert!(card.verify("111111", 1111));
    }

    #[test]
    fn test_verify_wrong_pin() {
        let card = Card::new("111111".to_string(), 1111);
        assert!(!card.verify("111111", 9999));
    }

    #[test]
    fn test_verify_wrong_number() {
        let card = Card::new("111111".to_string(), 1111);
        assert!(!card.verify("999999", 1111));
    }
}
