//! Order Handlers

pub(crate) mod create;
pub(crate) mod index;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use plaza::catalog::ProductId;
use plaza_app::domain::orders::records::{OrderLine, OrderRecord};

/// Order Line
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderLineBody {
    /// Numeric product id.
    pub product: u32,
    /// Display name snapshot at purchase time.
    pub name: String,
    pub size: String,
    pub quantity: u32,
    /// Discounted per-unit price in minor units.
    pub unit_price: u64,
}

impl From<OrderLineBody> for OrderLine {
    fn from(line: OrderLineBody) -> Self {
        OrderLine {
            product: ProductId::new(line.product),
            name: line.name,
            size: line.size,
            quantity: line.quantity,
            unit_price: line.unit_price,
        }
    }
}

impl From<OrderLine> for OrderLineBody {
    fn from(line: OrderLine) -> Self {
        OrderLineBody {
            product: line.product.get(),
            name: line.name,
            size: line.size,
            quantity: line.quantity,
            unit_price: line.unit_price,
        }
    }
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// Order UUID.
    pub id: String,
    pub items: Vec<OrderLineBody>,
    /// Pre-discount subtotal in minor units.
    pub subtotal: u64,
    /// Discount amount in minor units.
    pub discount: u64,
    /// Discount percentage applied at checkout.
    pub discount_percent: u8,
    /// Amount actually charged, in minor units.
    pub final_amount: u64,
    pub status: String,
    pub created_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(record: OrderRecord) -> Self {
        OrderResponse {
            id: record.uuid.to_string(),
            items: record.items.into_iter().map(Into::into).collect(),
            subtotal: record.subtotal,
            discount: record.discount,
            discount_percent: record.discount_percent,
            final_amount: record.final_amount,
            status: record.status.as_str().to_string(),
            created_at: record.created_at.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use plaza::catalog::ProductId;
    use plaza_app::domain::orders::records::{OrderRecord, OrderStatus, OrderUuid};

    use crate::test_helpers::TEST_ACCOUNT_UUID;

    use super::OrderLine;

    pub(crate) fn make_order(subtotal: u64, discount: u64) -> OrderRecord {
        OrderRecord {
            uuid: OrderUuid::new(),
            account_uuid: TEST_ACCOUNT_UUID,
            items: vec![OrderLine {
                product: ProductId::new(101),
                name: "Peplum Blouse".to_string(),
                size: "M".to_string(),
                quantity: 2,
                unit_price: (subtotal - discount) / 2,
            }],
            subtotal,
            discount,
            discount_percent: 10,
            final_amount: subtotal - discount,
            status: OrderStatus::Paid,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }
}

#[cfg(test)]
pub(crate) use tests::make_order;
