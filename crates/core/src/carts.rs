//! Carts
//!
//! A cart is a product-keyed, size-keyed quantity map. An entry exists
//! only while its quantity is positive: decrementing a size to zero
//! removes the size key, and removing the last size removes the product
//! key. The serialized form is the wire document shape
//! `{ "101": { "M": 2 } }`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::catalog::ProductId;

/// Quantities per size label for a single product.
pub type SizeQuantities = FxHashMap<String, u32>;

/// A size-keyed quantity map, one instance per cart scope (guest or
/// server).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: FxHashMap<ProductId, SizeQuantities>,
}

impl Cart {
    /// Creates an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of the given product and size, creating the nested
    /// entries on demand. Never fails.
    pub fn increment(&mut self, product: ProductId, size: &str) {
        let sizes = self.lines.entry(product).or_default();
        let quantity = sizes.entry(size.to_string()).or_insert(0);

        *quantity = quantity.saturating_add(1);
    }

    /// Removes one unit of the given product and size. A no-op when the
    /// entry is absent. Prunes the size key when the quantity reaches
    /// zero, and the product key when its last size is pruned.
    pub fn decrement(&mut self, product: ProductId, size: &str) {
        let Some(sizes) = self.lines.get_mut(&product) else {
            return;
        };

        let Some(quantity) = sizes.get_mut(size) else {
            return;
        };

        *quantity = quantity.saturating_sub(1);

        if *quantity == 0 {
            sizes.remove(size);
        }

        if sizes.is_empty() {
            self.lines.remove(&product);
        }
    }

    /// Sets the exact quantity of a (product, size) line. A zero
    /// quantity removes the line, keeping the pruning invariant.
    pub fn set_quantity(&mut self, product: ProductId, size: &str, quantity: u32) {
        if quantity == 0 {
            self.remove_line(product, size);
            return;
        }

        self.lines
            .entry(product)
            .or_default()
            .insert(size.to_string(), quantity);
    }

    /// Unconditionally deletes a (product, size) line regardless of its
    /// quantity. Distinct from decrementing to zero.
    pub fn remove_line(&mut self, product: ProductId, size: &str) {
        let Some(sizes) = self.lines.get_mut(&product) else {
            return;
        };

        sizes.remove(size);

        if sizes.is_empty() {
            self.lines.remove(&product);
        }
    }

    /// Atomically swaps the entire cart contents. Used by cart merge
    /// and by post-checkout clearing.
    pub fn replace_all(&mut self, new_cart: Cart) {
        self.lines = new_cart.lines;
    }

    /// Adds every (product, size) quantity of `other` to this cart,
    /// summing quantities rather than overwriting them.
    pub fn merge_from(&mut self, other: &Cart) {
        for (product, sizes) in &other.lines {
            let own = self.lines.entry(*product).or_default();

            for (size, quantity) in sizes {
                let entry = own.entry(size.clone()).or_insert(0);

                *entry = entry.saturating_add(*quantity);
            }
        }
    }

    /// Quantity stored for a (product, size) line, zero when absent.
    #[must_use]
    pub fn quantity(&self, product: ProductId, size: &str) -> u32 {
        self.lines
            .get(&product)
            .and_then(|sizes| sizes.get(size))
            .copied()
            .unwrap_or(0)
    }

    /// Whether the cart holds no lines at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across every line.
    #[must_use]
    pub fn total_units(&self) -> u64 {
        self.lines
            .values()
            .flat_map(SizeQuantities::values)
            .map(|quantity| u64::from(*quantity))
            .sum()
    }

    /// Iterates every (product, size, quantity) line in the cart.
    pub fn lines(&self) -> impl Iterator<Item = (ProductId, &str, u32)> {
        self.lines.iter().flat_map(|(product, sizes)| {
            sizes
                .iter()
                .map(|(size, quantity)| (*product, size.as_str(), *quantity))
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const SHIRT: ProductId = ProductId::new(101);
    const JACKET: ProductId = ProductId::new(102);

    #[test]
    fn increment_creates_nested_entries() {
        let mut cart = Cart::new();

        cart.increment(SHIRT, "M");
        cart.increment(SHIRT, "M");
        cart.increment(SHIRT, "L");

        assert_eq!(cart.quantity(SHIRT, "M"), 2);
        assert_eq!(cart.quantity(SHIRT, "L"), 1);
        assert_eq!(cart.total_units(), 3);
    }

    #[test]
    fn decrement_absent_entry_is_noop() {
        let mut cart = Cart::new();

        cart.decrement(SHIRT, "M");

        assert!(cart.is_empty());
    }

    #[test]
    fn decrement_to_zero_prunes_size_and_product_keys() {
        let mut cart = Cart::new();

        cart.increment(SHIRT, "M");
        cart.increment(SHIRT, "L");
        cart.decrement(SHIRT, "M");

        assert_eq!(cart.quantity(SHIRT, "M"), 0);
        assert_eq!(cart.quantity(SHIRT, "L"), 1);

        cart.decrement(SHIRT, "L");

        assert!(cart.is_empty(), "last size removed must prune product key");
    }

    #[test]
    fn no_zero_quantity_line_is_ever_stored() {
        let mut cart = Cart::new();

        cart.increment(SHIRT, "M");
        cart.increment(JACKET, "L");
        cart.decrement(SHIRT, "M");
        cart.decrement(SHIRT, "M");
        cart.decrement(JACKET, "L");

        assert!(cart.lines().all(|(_, _, quantity)| quantity > 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn set_quantity_overwrites_and_zero_prunes() {
        let mut cart = Cart::new();

        cart.set_quantity(SHIRT, "M", 5);
        assert_eq!(cart.quantity(SHIRT, "M"), 5);

        cart.set_quantity(SHIRT, "M", 2);
        assert_eq!(cart.quantity(SHIRT, "M"), 2);

        cart.set_quantity(SHIRT, "M", 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn remove_line_deletes_regardless_of_quantity() {
        let mut cart = Cart::new();

        cart.increment(SHIRT, "M");
        cart.increment(SHIRT, "M");
        cart.increment(SHIRT, "M");
        cart.remove_line(SHIRT, "M");

        assert!(cart.is_empty());
    }

    #[test]
    fn replace_all_swaps_contents() {
        let mut cart = Cart::new();
        cart.increment(SHIRT, "M");

        let mut replacement = Cart::new();
        replacement.increment(JACKET, "S");

        cart.replace_all(replacement.clone());

        assert_eq!(cart, replacement);
    }

    #[test]
    fn merge_from_sums_quantities() {
        let mut server = Cart::new();
        server.increment(SHIRT, "M");
        server.increment(SHIRT, "M");

        let mut guest = Cart::new();
        guest.increment(SHIRT, "M");
        guest.increment(JACKET, "L");

        server.merge_from(&guest);

        assert_eq!(server.quantity(SHIRT, "M"), 3);
        assert_eq!(server.quantity(JACKET, "L"), 1);
    }

    #[test]
    fn serde_round_trips_wire_document_shape() -> TestResult {
        let mut cart = Cart::new();
        cart.increment(SHIRT, "M");
        cart.increment(SHIRT, "M");

        let json = serde_json::to_value(&cart)?;

        assert_eq!(json, serde_json::json!({ "101": { "M": 2 } }));

        let decoded: Cart = serde_json::from_value(json)?;

        assert_eq!(decoded, cart);

        Ok(())
    }
}
