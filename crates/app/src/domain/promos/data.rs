//! Promo Data

use plaza::promos::Discount;

/// New Promo Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPromo {
    /// Raw code; normalised to upper case on insert.
    pub code: String,
    pub discount: Discount,
    /// Minimum qualifying cart subtotal in minor units.
    pub min_cart_value: u64,
    pub active: bool,
}

/// The outcome of a successful promo application, recomputed from the
/// current cart subtotal on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedPromo {
    /// The resolved discount shape, kept for later repricing.
    pub shape: Discount,
    /// Discount percentage, zero for fixed-amount promos.
    pub percent: u8,
    /// Discount amount in minor units against the submitted subtotal.
    pub discount: u64,
    /// `subtotal - discount` in minor units.
    pub new_total: u64,
}
