//! Types used throughout the ledger.

/// Decimal precision for monetary values.
/// Amounts are stored as fixed-point integers in units of 1/10000.
pub const DECIMAL_PRECISION: f64 = 10000.0;

/// Account ID type, representing a unique identifier for an account.
pub type AccountId = u32;

/// PIN type for card credentials.
pub type Pin = u32;

/// Money type, representing a fixed-point monetary value.
pub type Money = i64;

/// Parses a user-entered decimal amount into its fixed-point representation.
/// Returns `None` for anything that is not a finite number.
pub fn parse_money(input: &str) -> Option<Money> {
    let value: f64 = input.trim().parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some((value * DECIMAL_PRECISION).round() as Money)
}

/// Formats a fixed-point amount with two decimal places for display.
pub fn format_money(amount: Money) -> String {
    format!("{:.2}", amount as f64 / DECIMAL_PRECISION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_money() {
        assert_eq!(parse_money("2000"), Some(20_000_000));
        assert_eq!(parse_money("10.50"), Some(105_000));
        assert_eq!(parse_money(" 0.0001 "), Some(1));
        assert_eq!(parse_money("-5"), Some(-50_000));
        assert_eq!(parse_money("abc"), None);
        assert_eq!(parse_money(""), None);
        assert_eq!(parse_money("inf"), None);
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(20_000_000), "2000.00");
        assert_eq!(format_money(105_000), "10.50");
        assert_eq!(format_money(0), "0.00");
    }
}
