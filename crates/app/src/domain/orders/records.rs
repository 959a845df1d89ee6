//! Order Records

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use plaza::{catalog::ProductId, pricing::PricedLine};

use crate::{domain::accounts::records::AccountUuid, uuids::TypedUuid};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// A line snapshot persisted on an order. `unit_price` already has the
/// proportional discount baked in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product: ProductId,
    /// Display name snapshot at purchase time.
    pub name: String,
    pub size: String,
    pub quantity: u32,
    /// Discounted per-unit price in minor units.
    pub unit_price: u64,
}

impl From<PricedLine> for OrderLine {
    fn from(line: PricedLine) -> Self {
        Self {
            product: line.product,
            name: line.name,
            size: line.size,
            quantity: line.quantity,
            unit_price: line.discounted_unit_price,
        }
    }
}

/// Order status. Orders are created only after the payment collaborator
/// confirms a successful charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Paid,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }
}

/// An immutable order record. Never edited after creation; cancellation
/// and refunds live elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub account_uuid: AccountUuid,
    pub items: Vec<OrderLine>,
    /// Pre-discount subtotal in minor units.
    pub subtotal: u64,
    /// Discount amount in minor units.
    pub discount: u64,
    /// Discount percentage applied at checkout.
    pub discount_percent: u8,
    /// Amount actually charged, in minor units.
    pub final_amount: u64,
    pub status: OrderStatus,
    pub created_at: Timestamp,
}
