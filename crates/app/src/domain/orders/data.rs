//! Order Data

use crate::domain::orders::records::OrderLine;

/// New Order Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub items: Vec<OrderLine>,
    /// Pre-discount subtotal in minor units.
    pub subtotal: u64,
    /// Discount amount in minor units.
    pub discount: u64,
    /// Discount percentage applied at checkout.
    pub discount_percent: u8,
    /// Amount charged by the payment collaborator, in minor units.
    pub final_amount: u64,
}
