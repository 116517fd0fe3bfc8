pub mod catalog;
pub mod checkout;
pub mod error;
pub mod logger;
pub mod config;

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Parse user-typed amount text. Empty or unparsable text is `0`.
pub fn parse_amount(text: &str) -> Decimal {
    let trimmed = text.trim();
    // Digit separators are not number input.
    if trimmed.is_empty() || trimmed.contains('_') {
        return Decimal::ZERO;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .unwrap_or(Decimal::ZERO)
}

/// Round to cents (half away from zero) and pin the scale to two digits.
pub fn round_amount(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Format an amount with exactly two fraction digits, e.g. `58.00`.
pub fn format_amount(amount: Decimal) -> String {
    round_amount(amount).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_coerces_garbage_to_zero() {
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("   "), Decimal::ZERO);
        assert_eq!(parse_amount("abc"), Decimal::ZERO);
        assert_eq!(parse_amount("12.5.3"), Decimal::ZERO);
        assert_eq!(parse_amount("1_000"), Decimal::ZERO);
        assert_eq!(parse_amount("1_0e2"), Decimal::ZERO);
    }

    #[test]
    fn test_parse_amount_accepts_decimal_text() {
        assert_eq!(parse_amount("58.00"), Decimal::new(5800, 2));
        assert_eq!(parse_amount(" 250 "), Decimal::from(250));
        assert_eq!(parse_amount("-3.5"), Decimal::new(-35, 1));
        assert_eq!(parse_amount("1e2"), Decimal::from(100));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Decimal::from(58)), "58.00");
        assert_eq!(format_amount(Decimal::new(49999, 2)), "499.99");
        assert_eq!(format_amount(Decimal::new(12345, 3)), "12.35");
        assert_eq!(format_amount(Decimal::ZERO), "0.00");
    }
}
