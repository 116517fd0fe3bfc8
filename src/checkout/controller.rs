use crate::checkout::hook::{CheckoutHook, NoOpHook};
use crate::checkout::method::{available_methods, SettlementMethod, SubMethod};
use crate::checkout::payload::{PayloadBuilder, PaymentPayload, Provider};
use crate::checkout::session::{recompute, CheckoutSession};
use crate::config::MerchantConfig;
use crate::format_amount;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Checkout view state. The session only exists while open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Closed,
    Open(CheckoutSession),
}

/// Acknowledgement emitted by the confirm action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub method: SettlementMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_method: Option<SubMethod>,
    pub raw_amount: Decimal,
    pub discount: Decimal,
    pub final_amount: Decimal,
    pub currency_symbol: String,
}

impl Acknowledgement {
    pub fn message(&self) -> String {
        format!(
            "Payment recorded for {}{}",
            self.currency_symbol,
            format_amount(self.final_amount)
        )
    }
}

/// Orchestrates one checkout view: seeding on open, synchronous recompute on
/// every edit, payload derivation and confirm.
///
/// Generic over the hook (observer) and the RNG used for the random reduction.
pub struct CheckoutController<H: CheckoutHook = NoOpHook, R: Rng = StdRng> {
    merchant: MerchantConfig,
    builder: PayloadBuilder,
    view: View,
    hook: H,
    rng: R,
}

impl CheckoutController<NoOpHook, StdRng> {
    pub fn new(merchant: MerchantConfig) -> Self {
        CheckoutController::with_parts(merchant, PayloadBuilder::new(), NoOpHook, StdRng::from_entropy())
    }

    /// Controller with a reproducible random reduction.
    pub fn seeded(merchant: MerchantConfig, seed: u64) -> Self {
        CheckoutController::with_parts(
            merchant,
            PayloadBuilder::new(),
            NoOpHook,
            StdRng::seed_from_u64(seed),
        )
    }
}

impl<H: CheckoutHook, R: Rng> CheckoutController<H, R> {
    pub fn with_parts(merchant: MerchantConfig, builder: PayloadBuilder, hook: H, rng: R) -> Self {
        CheckoutController {
            merchant,
            builder,
            view: View::Closed,
            hook,
            rng,
        }
    }

    pub fn merchant(&self) -> &MerchantConfig {
        &self.merchant
    }

    pub fn hook(&self) -> &H {
        &self.hook
    }

    pub fn hook_mut(&mut self) -> &mut H {
        &mut self.hook
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn is_open(&self) -> bool {
        matches!(self.view, View::Open(_))
    }

    pub fn session(&self) -> Option<&CheckoutSession> {
        match &self.view {
            View::Open(session) => Some(session),
            View::Closed => None,
        }
    }

    pub fn available_methods(&self) -> Vec<SettlementMethod> {
        available_methods(&self.merchant)
    }

    /// Open (or reopen) the view with a fresh session. Nothing carries over.
    pub fn open(&mut self, subtotal: Decimal) {
        let session = CheckoutSession::open(subtotal);
        info!(
            subtotal = %format_amount(subtotal),
            store = %self.merchant.store_name,
            "checkout opened"
        );
        self.hook.on_opened(&session);
        self.view = View::Open(session);
    }

    /// Discard the session.
    pub fn close(&mut self) {
        if let View::Open(_) = std::mem::replace(&mut self.view, View::Closed) {
            info!("checkout closed");
            self.hook.on_closed();
        }
    }

    pub fn edit_amount(&mut self, text: &str) -> bool {
        let applied = self.apply_edit(|session| session.set_amount_text(text));
        if let Some(session) = self.session() {
            if session.amount_holder().is_coerced() {
                warn!(text, "unparsable amount treated as 0");
            }
        }
        applied
    }

    /// Switch method. Unavailable provider methods are refused; re-selecting
    /// the active method changes nothing.
    pub fn select_method(&mut self, method: SettlementMethod) -> bool {
        if !method.is_available(&self.merchant) {
            warn!(method = method.label(), "settlement method not configured");
            return false;
        }
        if self.session().map(|s| s.method()) == Some(method) {
            return true;
        }
        self.apply_edit(|session| session.switch_method(method))
    }

    /// Switch bank program. Ignored (but remembered) outside the online promotion.
    pub fn select_sub_method(&mut self, sub_method: SubMethod) -> bool {
        if self.session().map(|s| s.sub_method()) == Some(sub_method) {
            return true;
        }
        self.apply_edit(|session| session.switch_sub_method(sub_method))
    }

    /// Payment request for the active provider method, if any.
    pub fn payload(&self) -> Option<PaymentPayload> {
        let session = self.session()?;
        let provider = session.method().provider()?;
        let merchant_id = match provider {
            Provider::Alipay => self.merchant.provider_a()?,
            Provider::WeChat => self.merchant.provider_b()?,
        };
        Some(self.builder.build(
            provider,
            merchant_id,
            &session.amount_holder().request_text(),
        ))
    }

    /// Confirm the current session. Does not mutate or close it.
    pub fn confirm(&mut self) -> Option<Acknowledgement> {
        let session = self.session()?;
        let ack = Acknowledgement {
            method: session.method(),
            sub_method: session.active_sub_method(),
            raw_amount: session.raw_amount(),
            discount: session.discount(),
            final_amount: session.final_amount(),
            currency_symbol: self.merchant.currency_symbol.clone(),
        };
        info!(method = ack.method.label(), "{}", ack.message());
        self.hook.on_confirmed(&ack);
        Some(ack)
    }

    fn apply_edit<F>(&mut self, edit: F) -> bool
    where
        F: FnOnce(&mut CheckoutSession),
    {
        let View::Open(session) = &mut self.view else {
            debug!("edit ignored: checkout is closed");
            return false;
        };
        edit(session);
        *session = recompute(session, &mut self.rng);
        debug!(
            method = session.method().label(),
            sub_method = session.sub_method().label(),
            raw = %format_amount(session.raw_amount()),
            discount = %format_amount(session.discount()),
            "recomputed"
        );
        self.hook.on_recomputed(session);
        true
    }
}
