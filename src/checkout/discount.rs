//! Promotion policies for the online-banking settlement method.
//!
//! Two mutually exclusive policies exist: a random reduction (bank X) and a
//! deterministic tiered discount (bank Y). Every other method carries no
//! discount at all.

use crate::checkout::method::{SettlementMethod, SubMethod};
use rand::Rng;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Upper bound of the random reduction.
pub const RANDOM_REDUCTION_CAP: Decimal = Decimal::from_parts(40, 0, 0, false, 0);

/// Smallest discount a random roll may produce.
pub const RANDOM_REDUCTION_FLOOR: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// (threshold, discount) pairs, highest threshold first.
const TIERS: [(Decimal, Decimal); 2] = [
    (
        Decimal::from_parts(500, 0, 0, false, 0),
        Decimal::from_parts(100, 0, 0, false, 0),
    ),
    (
        Decimal::from_parts(200, 0, 0, false, 0),
        Decimal::from_parts(50, 0, 0, false, 0),
    ),
];

/// Which discount rule applies for a (method, sub-method) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountPolicy {
    None,
    RandomReduction,
    TieredBank,
}

impl DiscountPolicy {
    pub fn for_method(method: SettlementMethod, sub_method: SubMethod) -> Self {
        match (method, sub_method) {
            (SettlementMethod::OnlinePromotion, SubMethod::BankX) => DiscountPolicy::RandomReduction,
            (SettlementMethod::OnlinePromotion, SubMethod::BankY) => DiscountPolicy::TieredBank,
            _ => DiscountPolicy::None,
        }
    }
}

/// Stored random-reduction draw.
///
/// The draw is sticky: amount edits keep it as long as it still fits under the
/// cap. `needs_reroll` marks "no valid draw yet" explicitly instead of reading
/// it off a zero value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickyDraw {
    value: Decimal,
    needs_reroll: bool,
}

impl StickyDraw {
    pub fn new() -> Self {
        StickyDraw {
            value: Decimal::ZERO,
            needs_reroll: true,
        }
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn needs_reroll(&self) -> bool {
        self.needs_reroll
    }

    /// Drop the stored draw so the next resolve rolls fresh.
    pub fn invalidate(&mut self) {
        self.value = Decimal::ZERO;
        self.needs_reroll = true;
    }

    /// Return the draw for `cap`, rolling only when invalidated or when the
    /// stored value no longer fits under the cap.
    pub fn resolve<R: Rng + ?Sized>(&mut self, cap: Decimal, rng: &mut R) -> Decimal {
        if self.needs_reroll || self.value > cap {
            self.value = roll_random_reduction(cap, rng);
            self.needs_reroll = false;
        }
        self.value
    }
}

impl Default for StickyDraw {
    fn default() -> Self {
        StickyDraw::new()
    }
}

/// Cap for the random reduction: `min(40, raw)`.
pub fn random_reduction_cap(raw_amount: Decimal) -> Decimal {
    raw_amount.min(RANDOM_REDUCTION_CAP)
}

/// Uniform draw in `[0, cap)`, floored to cents, at least `0.01`.
///
/// Works on whole cents: 53 random bits scale `ceil(cap * 100)` so the top
/// of the range is one cent short of the cap.
pub fn roll_random_reduction<R: Rng + ?Sized>(cap: Decimal, rng: &mut R) -> Decimal {
    let cents = (cap * Decimal::ONE_HUNDRED).ceil().to_u64().unwrap_or(0);
    if cents == 0 {
        return RANDOM_REDUCTION_FLOOR;
    }
    let unit = rng.next_u64() >> 11;
    let drawn = ((unit as u128 * cents as u128) >> 53) as i64;
    Decimal::new(drawn, 2).max(RANDOM_REDUCTION_FLOOR)
}

/// Deterministic bank-Y discount: 100 from 500, 50 from 200, otherwise 0.
pub fn tiered_discount(raw_amount: Decimal) -> Decimal {
    TIERS
        .iter()
        .find(|(threshold, _)| raw_amount >= *threshold)
        .map(|(_, discount)| *discount)
        .unwrap_or(Decimal::ZERO)
}

/// Compute the discount for the current inputs. Never fails.
pub fn compute_discount<R: Rng + ?Sized>(
    method: SettlementMethod,
    sub_method: SubMethod,
    raw_amount: Decimal,
    draw: &mut StickyDraw,
    rng: &mut R,
) -> Decimal {
    match DiscountPolicy::for_method(method, sub_method) {
        DiscountPolicy::None => Decimal::ZERO,
        DiscountPolicy::TieredBank => tiered_discount(raw_amount),
        DiscountPolicy::RandomReduction => {
            if raw_amount <= Decimal::ZERO {
                draw.invalidate();
                return Decimal::ZERO;
            }
            draw.resolve(random_reduction_cap(raw_amount), rng)
        }
    }
}
