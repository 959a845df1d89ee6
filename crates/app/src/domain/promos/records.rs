//! Promo Records

use jiff::Timestamp;

use plaza::promos::{Discount, Promo, PromoCode};

use crate::uuids::TypedUuid;

/// Promo UUID
pub type PromoUuid = TypedUuid<PromoRecord>;

/// Promo Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoRecord {
    pub uuid: PromoUuid,
    /// Canonical upper-cased code.
    pub code: PromoCode,
    pub discount: Discount,
    /// Minimum qualifying cart subtotal in minor units.
    pub min_cart_value: u64,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<PromoRecord> for Promo {
    fn from(record: PromoRecord) -> Self {
        Promo {
            code: record.code,
            discount: record.discount,
            min_cart_value: record.min_cart_value,
            active: record.active,
        }
    }
}
