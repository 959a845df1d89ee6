//! Promos
//!
//! The promo resolver decides whether a code applies to a cart subtotal
//! and at what discount shape. It never derives a currency amount: the
//! caller always recomputes the amount from the *current* subtotal,
//! since the subtotal may differ between validation time and use time.

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::ToPrimitive,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A promo code, upper-cased on construction. Lookups are
/// case-insensitive by virtue of this normalisation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromoCode(String);

impl PromoCode {
    /// Normalises a raw code to its canonical upper-cased form.
    #[must_use]
    pub fn new(code: &str) -> Self {
        Self(code.trim().to_uppercase())
    }

    /// The canonical upper-cased code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PromoCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The shape of a promo discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "amount")]
pub enum Discount {
    /// A percentage of the subtotal, 0 to 100.
    Percent(u8),

    /// A fixed amount in minor units.
    Fixed(u64),
}

impl Discount {
    /// Discount amount in minor units when applied to `subtotal`,
    /// rounded away from zero at the cent. A fixed discount is capped
    /// at the subtotal.
    #[must_use]
    pub fn amount_on(self, subtotal: u64) -> u64 {
        match self {
            Self::Percent(percent) => percent_of(percent, subtotal),
            Self::Fixed(amount) => amount.min(subtotal),
        }
    }

    /// The percentage magnitude, zero for fixed discounts.
    #[must_use]
    pub fn percent(self) -> u8 {
        match self {
            Self::Percent(percent) => percent,
            Self::Fixed(_) => 0,
        }
    }
}

/// A stored promo record as the resolver sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Promo {
    /// Canonical upper-cased code.
    pub code: PromoCode,

    /// Discount shape and magnitude.
    pub discount: Discount,

    /// Minimum qualifying cart subtotal in minor units.
    pub min_cart_value: u64,

    /// Whether the promo is live. An inactive promo resolves exactly
    /// like a nonexistent one.
    pub active: bool,
}

/// Reasons a promo code does not apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PromoError {
    /// The code is absent or inactive. The two cases are deliberately
    /// indistinguishable so deactivated codes leak no information.
    #[error("invalid promo code")]
    InvalidCode,

    /// The cart subtotal is under the promo's minimum.
    #[error("minimum cart value for this promo code is {minimum} minor units")]
    BelowMinimum {
        /// The promo's minimum qualifying subtotal, for user messaging.
        minimum: u64,
    },
}

/// Resolves a looked-up promo against the current cart subtotal.
///
/// `found` is the storage lookup result for the upper-cased code;
/// `None` and an inactive record both yield [`PromoError::InvalidCode`].
/// Idempotent and side-effect-free.
///
/// # Errors
///
/// - [`PromoError::InvalidCode`] when the code is absent or inactive.
/// - [`PromoError::BelowMinimum`] when the subtotal is under the
///   promo's minimum qualifying value.
pub fn resolve(found: Option<&Promo>, cart_subtotal: u64) -> Result<Discount, PromoError> {
    let promo = found.filter(|promo| promo.active).ok_or(PromoError::InvalidCode)?;

    if cart_subtotal < promo.min_cart_value {
        return Err(PromoError::BelowMinimum {
            minimum: promo.min_cart_value,
        });
    }

    Ok(promo.discount)
}

/// `percent`% of `amount` in minor units, rounded midpoint-away-from-zero.
fn percent_of(percent: u8, amount: u64) -> u64 {
    let applied = Decimal::from(amount) * Decimal::from(percent) / Decimal::from(100_u8);

    applied
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .unwrap_or(0)
}
