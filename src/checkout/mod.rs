pub mod amount;
pub mod controller;
pub mod discount;
pub mod hook;
pub mod method;
pub mod payload;
pub mod session;

pub use amount::AmountHolder;
pub use controller::{Acknowledgement, CheckoutController, View};
pub use discount::{
    compute_discount, random_reduction_cap, roll_random_reduction, tiered_discount,
    DiscountPolicy, StickyDraw, RANDOM_REDUCTION_CAP, RANDOM_REDUCTION_FLOOR,
};
pub use hook::{CheckoutHook, NoOpHook};
pub use method::{available_methods, SettlementMethod, SubMethod};
pub use payload::{request_uri, PayloadBuilder, PaymentPayload, Provider};
pub use session::{recompute, CheckoutSession, SessionSummary};
