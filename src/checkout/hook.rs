//! Hook: observer injected into the checkout controller.
//!
//! CheckoutController<H: CheckoutHook> calls the hook at each lifecycle stage.
//! The confirm acknowledgement reaches the outside world through `on_confirmed`.

use crate::checkout::controller::Acknowledgement;
use crate::checkout::session::CheckoutSession;

/// Lifecycle callbacks. None of them can fail or veto a transition.
pub trait CheckoutHook {
    /// Called after the view opens with a freshly seeded session.
    fn on_opened(&mut self, _session: &CheckoutSession) {}

    /// Called after every recompute triggered by an edit.
    fn on_recomputed(&mut self, _session: &CheckoutSession) {}

    /// Called when the customer confirms.
    fn on_confirmed(&mut self, _ack: &Acknowledgement) {}

    /// Called after the view closes and the session is discarded.
    fn on_closed(&mut self) {}
}

/// No-op hook: the default.
#[derive(Debug, Clone, Default)]
pub struct NoOpHook;

impl CheckoutHook for NoOpHook {}
