use crate::checkout::amount::AmountHolder;
use crate::checkout::discount::{compute_discount, StickyDraw};
use crate::checkout::method::{SettlementMethod, SubMethod};
use crate::format_amount;
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// State of one open checkout view.
///
/// Invariants:
/// - `discount == 0` whenever `method != OnlinePromotion`
/// - `final_amount() == max(0, raw_amount() - discount)`
/// - `sub_method` is inert outside `OnlinePromotion`
///
/// `discount` is only ever written by [`recompute`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    amount: AmountHolder,
    method: SettlementMethod,
    sub_method: SubMethod,
    discount: Decimal,
    draw: StickyDraw,
}

impl CheckoutSession {
    /// Fresh session seeded from the selection subtotal.
    pub fn open(subtotal: Decimal) -> Self {
        CheckoutSession {
            amount: AmountHolder::seeded(subtotal),
            method: SettlementMethod::Cash,
            sub_method: SubMethod::BankX,
            discount: Decimal::ZERO,
            draw: StickyDraw::new(),
        }
    }

    pub fn amount_text(&self) -> &str {
        self.amount.text()
    }

    pub fn raw_amount(&self) -> Decimal {
        self.amount.value()
    }

    pub fn method(&self) -> SettlementMethod {
        self.method
    }

    pub fn sub_method(&self) -> SubMethod {
        self.sub_method
    }

    /// Sub-method when it means something, i.e. under the online promotion.
    pub fn active_sub_method(&self) -> Option<SubMethod> {
        match self.method {
            SettlementMethod::OnlinePromotion => Some(self.sub_method),
            _ => None,
        }
    }

    pub fn discount(&self) -> Decimal {
        self.discount
    }

    /// `max(0, raw - discount)`; never negative.
    pub fn final_amount(&self) -> Decimal {
        (self.raw_amount() - self.discount).max(Decimal::ZERO)
    }

    /// Text shown in the amount field: the computed final amount while the
    /// promotion overlay is up, the typed text otherwise.
    pub fn display_amount(&self) -> String {
        match self.method {
            SettlementMethod::OnlinePromotion => format_amount(self.final_amount()),
            _ => self.amount.text().to_string(),
        }
    }

    pub(crate) fn amount_holder(&self) -> &AmountHolder {
        &self.amount
    }

    pub(crate) fn set_amount_text(&mut self, text: &str) {
        self.amount.set_text(text);
    }

    /// Switch method. Resets the sub-method and drops any stored draw.
    pub(crate) fn switch_method(&mut self, method: SettlementMethod) {
        self.method = method;
        self.sub_method = SubMethod::BankX;
        self.discount = Decimal::ZERO;
        self.draw.invalidate();
    }

    /// Switch bank program. Entering bank X always forces a fresh roll.
    pub(crate) fn switch_sub_method(&mut self, sub_method: SubMethod) {
        self.sub_method = sub_method;
        self.discount = Decimal::ZERO;
        self.draw.invalidate();
    }

    pub fn summary(&self, currency_symbol: &str) -> SessionSummary {
        SessionSummary {
            method: self.method,
            sub_method: self.active_sub_method(),
            amount_text: self.amount.text().to_string(),
            raw_amount: format_amount(self.raw_amount()),
            discount: format_amount(self.discount),
            final_amount: format_amount(self.final_amount()),
            currency_symbol: currency_symbol.to_string(),
        }
    }
}

/// Recompute derived fields after a mutation.
///
/// Returns the next session; the input is left untouched. Only the stored
/// random draw and `discount` can differ between the two.
pub fn recompute<R: Rng + ?Sized>(session: &CheckoutSession, rng: &mut R) -> CheckoutSession {
    let mut next = session.clone();
    next.discount = compute_discount(
        next.method,
        next.sub_method,
        next.raw_amount(),
        &mut next.draw,
        rng,
    );
    next
}

/// Display-ready snapshot of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub method: SettlementMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_method: Option<SubMethod>,
    pub amount_text: String,
    pub raw_amount: String,
    pub discount: String,
    pub final_amount: String,
    pub currency_symbol: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_open_defaults() {
        let session = CheckoutSession::open(Decimal::from(58));
        assert_eq!(session.amount_text(), "58.00");
        assert_eq!(session.method(), SettlementMethod::Cash);
        assert_eq!(session.sub_method(), SubMethod::BankX);
        assert_eq!(session.active_sub_method(), None);
        assert_eq!(session.discount(), Decimal::ZERO);
        assert_eq!(session.final_amount(), Decimal::from(58));
    }

    #[test]
    fn test_recompute_does_not_mutate_input() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut session = CheckoutSession::open(Decimal::from(250));
        session.switch_method(SettlementMethod::OnlinePromotion);
        session.switch_sub_method(SubMethod::BankY);

        let next = recompute(&session, &mut rng);
        assert_eq!(session.discount(), Decimal::ZERO);
        assert_eq!(next.discount(), Decimal::from(50));
        assert_eq!(next.final_amount(), Decimal::from(200));
    }

    #[test]
    fn test_final_amount_clamps_at_zero() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut session = CheckoutSession::open(Decimal::from(600));
        session.switch_method(SettlementMethod::OnlinePromotion);
        session.switch_sub_method(SubMethod::BankY);
        let mut session = recompute(&session, &mut rng);
        assert_eq!(session.discount(), Decimal::from(100));

        // Amount drops below the discount before the next recompute.
        session.set_amount_text("30");
        assert_eq!(session.final_amount(), Decimal::ZERO);

        let session = recompute(&session, &mut rng);
        assert_eq!(session.discount(), Decimal::ZERO);
        assert_eq!(session.final_amount(), Decimal::from(30));
    }

    #[test]
    fn test_display_amount_overlay() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut session = CheckoutSession::open(Decimal::ZERO);
        session.set_amount_text("250");
        assert_eq!(session.display_amount(), "250");

        session.switch_method(SettlementMethod::OnlinePromotion);
        session.switch_sub_method(SubMethod::BankY);
        let session = recompute(&session, &mut rng);
        assert_eq!(session.display_amount(), "200.00");
    }

    #[test]
    fn test_summary_hides_inert_sub_method() {
        let session = CheckoutSession::open(Decimal::from(58));
        let summary = session.summary("¥");
        assert_eq!(summary.sub_method, None);
        assert_eq!(summary.final_amount, "58.00");
        assert_eq!(summary.discount, "0.00");
    }
}
