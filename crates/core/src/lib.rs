//! Plaza
//!
//! Plaza is the pure pricing core of a storefront: a size-keyed cart
//! quantity map, a read-only price catalog, a promo-code resolver, and a
//! pricing engine that allocates cart-level discounts proportionally
//! across selected line items.
//!
//! Everything in this crate is synchronous and side-effect-free. All
//! money amounts are minor currency units (cents).

pub mod carts;
pub mod catalog;
pub mod pricing;
pub mod promos;
