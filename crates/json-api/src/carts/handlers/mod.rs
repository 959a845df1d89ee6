//! Cart Handlers

pub(crate) mod get;
pub(crate) mod put;

use std::collections::BTreeMap;

use salvo::{http::StatusError, oapi::ToSchema};
use serde::{Deserialize, Serialize};

use plaza::{carts::Cart, catalog::ProductId};

/// The cart wire document: product id -> size -> quantity, e.g.
/// `{ "101": { "M": 2 } }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub(crate) struct CartBody(pub BTreeMap<String, BTreeMap<String, u32>>);

impl From<Cart> for CartBody {
    fn from(cart: Cart) -> Self {
        let mut lines: BTreeMap<String, BTreeMap<String, u32>> = BTreeMap::new();

        for (product, size, quantity) in cart.lines() {
            lines
                .entry(product.to_string())
                .or_default()
                .insert(size.to_string(), quantity);
        }

        Self(lines)
    }
}

impl TryFrom<CartBody> for Cart {
    type Error = StatusError;

    fn try_from(body: CartBody) -> Result<Self, Self::Error> {
        let mut cart = Cart::new();

        for (product, sizes) in body.0 {
            let product = product.parse::<u32>().map_err(|_parse_error| {
                StatusError::bad_request().brief("Product keys must be numeric ids")
            })?;

            for (size, quantity) in sizes {
                cart.set_quantity(ProductId::new(product), &size, quantity);
            }
        }

        Ok(cart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_the_wire_shape() {
        let mut cart = Cart::new();
        cart.increment(ProductId::new(101), "M");
        cart.increment(ProductId::new(101), "M");

        let body = CartBody::from(cart.clone());
        let back = Cart::try_from(body).unwrap_or_default();

        assert_eq!(back, cart);
    }

    #[test]
    fn non_numeric_product_key_is_rejected() {
        let mut lines = BTreeMap::new();
        lines.insert("shirt".to_string(), BTreeMap::from([("M".to_string(), 1)]));

        assert!(Cart::try_from(CartBody(lines)).is_err());
    }

    #[test]
    fn zero_quantities_are_pruned() {
        let mut lines = BTreeMap::new();
        lines.insert("101".to_string(), BTreeMap::from([("M".to_string(), 0)]));

        let cart = Cart::try_from(CartBody(lines)).unwrap_or_default();

        assert!(cart.is_empty());
    }
}
