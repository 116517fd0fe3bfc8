use crate::{format_amount, parse_amount};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Editable raw bill amount.
///
/// Holds the text exactly as typed so transient states ("", "12.") echo back
/// unchanged; `value()` is what the engine computes with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountHolder {
    text: String,
}

impl AmountHolder {
    /// Seed from the selection subtotal: two fraction digits, or empty when zero.
    pub fn seeded(subtotal: Decimal) -> Self {
        let text = if subtotal.is_zero() {
            String::new()
        } else {
            format_amount(subtotal)
        };
        AmountHolder { text }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    pub fn value(&self) -> Decimal {
        parse_amount(&self.text)
    }

    /// Amount text for a provider request: trimmed, or `0` when blank or unparsable.
    pub fn request_text(&self) -> String {
        let trimmed = self.text.trim();
        if trimmed.is_empty() || self.is_coerced() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }

    /// True when non-empty text did not parse and is being treated as zero.
    pub fn is_coerced(&self) -> bool {
        !self.text.trim().is_empty() && self.value().is_zero() && !looks_like_zero(&self.text)
    }
}

fn looks_like_zero(text: &str) -> bool {
    text.trim()
        .trim_start_matches(['+', '-'])
        .chars()
        .all(|c| c == '0' || c == '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_formats_two_digits() {
        let holder = AmountHolder::seeded(Decimal::from(58));
        assert_eq!(holder.text(), "58.00");
        assert_eq!(holder.value(), Decimal::from(58));
    }

    #[test]
    fn test_seeded_zero_is_empty() {
        let holder = AmountHolder::seeded(Decimal::ZERO);
        assert_eq!(holder.text(), "");
        assert_eq!(holder.value(), Decimal::ZERO);
    }

    #[test]
    fn test_transient_text_echoes_verbatim() {
        let mut holder = AmountHolder::default();
        holder.set_text("12.");
        assert_eq!(holder.text(), "12.");
        holder.set_text("abc");
        assert_eq!(holder.text(), "abc");
        assert_eq!(holder.value(), Decimal::ZERO);
        assert!(holder.is_coerced());
    }

    #[test]
    fn test_request_text() {
        let mut holder = AmountHolder::default();
        assert_eq!(holder.request_text(), "0");
        holder.set_text("12,5kg");
        assert_eq!(holder.request_text(), "0");
        holder.set_text(" 58.00 ");
        assert_eq!(holder.request_text(), "58.00");
        holder.set_text("0.00");
        assert_eq!(holder.request_text(), "0.00");
    }

    #[test]
    fn test_zero_text_is_not_coerced() {
        let mut holder = AmountHolder::default();
        holder.set_text("0.00");
        assert!(!holder.is_coerced());
        holder.set_text("");
        assert!(!holder.is_coerced());
    }
}
