//! Pricing
//!
//! Combines cart contents, catalog prices and an applied discount into
//! subtotal, discount amount and final total for a *selected subset* of
//! cart lines, including the proportional per-line allocation persisted
//! on orders. The engine never fails: malformed inputs (stale product
//! references, zero quantities) degrade to zero contributions, since
//! authoritative re-validation happens when the order is placed.

use std::str::FromStr;

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::ToPrimitive,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{carts::Cart, catalog::Catalog, catalog::ProductId, promos::Discount};

/// A (product, size) cart line selected for checkout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionKey {
    /// Product identifier.
    pub product: ProductId,

    /// Size label; may be empty for no-size products.
    pub size: String,
}

impl SelectionKey {
    /// Creates a selection key from its parts.
    #[must_use]
    pub fn new(product: ProductId, size: impl Into<String>) -> Self {
        Self {
            product,
            size: size.into(),
        }
    }
}

/// Error parsing the `"101-M"` wire form of a selection key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionKeyError {
    /// The key had no `-` separator.
    #[error("selection key is missing the `-` separator")]
    MissingSeparator,

    /// The product segment was not a number.
    #[error("selection key has a non-numeric product id")]
    InvalidProductId,
}

impl FromStr for SelectionKey {
    type Err = SelectionKeyError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let (product, size) = key
            .split_once('-')
            .ok_or(SelectionKeyError::MissingSeparator)?;

        let product = product
            .parse::<u32>()
            .map_err(|_| SelectionKeyError::InvalidProductId)?;

        Ok(Self::new(ProductId::new(product), size))
    }
}

impl std::fmt::Display for SelectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.product, self.size)
    }
}

/// A selected line with its proportional share of the cart-level
/// discount baked into the per-unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedLine {
    /// Product identifier.
    pub product: ProductId,

    /// Display name snapshot from the catalog.
    pub name: String,

    /// Size label.
    pub size: String,

    /// Units purchased.
    pub quantity: u32,

    /// Catalog unit price in minor units, before discount.
    pub unit_price: u64,

    /// Unit price after proportional discount, rounded to the cent.
    pub discounted_unit_price: u64,
}

/// Totals for a priced selection, all in minor units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedSelection {
    /// Pre-discount subtotal over selected lines only.
    pub subtotal: u64,

    /// Cart-level discount amount applied to the selected subtotal.
    pub discount: u64,

    /// `max(subtotal - discount, 0)`.
    pub total: u64,

    /// Per-line breakdown with discounted unit prices.
    pub lines: Vec<PricedLine>,
}

/// Pre-discount subtotal over *all* cart lines, for the cart-page
/// display figure. Lines missing from the catalog contribute zero.
#[must_use]
pub fn cart_subtotal(cart: &Cart, catalog: &Catalog) -> u64 {
    cart.lines()
        .filter_map(|(product, _, quantity)| {
            catalog
                .unit_price(product)
                .map(|unit| unit * u64::from(quantity))
        })
        .sum()
}

/// Prices the selected subset of cart lines.
///
/// The discount percentage always applies to the *selected* subtotal,
/// not the full-cart subtotal, so a partial checkout scales the
/// discount down with the smaller selection. Per-line discounted unit
/// prices are rounded to the cent independently with no remainder
/// redistribution; the reported `total` and `discount` derive from the
/// rounded lines, so a priced selection always equals the sum of its
/// line snapshots.
#[must_use]
pub fn price_selection(
    cart: &Cart,
    selection: &[SelectionKey],
    catalog: &Catalog,
    discount: Option<Discount>,
) -> PricedSelection {
    // Step 1: resolve selected keys, skipping stale references.
    let mut lines: Vec<PricedLine> = Vec::with_capacity(selection.len());

    for key in selection {
        let quantity = cart.quantity(key.product, &key.size);

        let Some(product) = catalog.get(key.product) else {
            continue;
        };

        if quantity == 0 {
            continue;
        }

        lines.push(PricedLine {
            product: key.product,
            name: product.name.clone(),
            size: key.size.clone(),
            quantity,
            unit_price: product.new_price,
            discounted_unit_price: product.new_price,
        });
    }

    // Step 2: subtotal over selected lines only.
    let subtotal: u64 = lines
        .iter()
        .map(|line| line.unit_price * u64::from(line.quantity))
        .sum();

    // Step 6: zero-subtotal guard; no allocation is attempted.
    if subtotal == 0 {
        return PricedSelection::default();
    }

    // Steps 3 and 4: cart-level discount against the selected subtotal.
    let discount_amount = discount.map_or(0, |discount| discount.amount_on(subtotal));

    // Step 5: proportional per-line allocation, rounded per line.
    let subtotal_dec = Decimal::from(subtotal);
    let discount_dec = Decimal::from(discount_amount);

    for line in &mut lines {
        let quantity_dec = Decimal::from(line.quantity);
        let line_total = Decimal::from(line.unit_price) * quantity_dec;

        let line_share = line_total / subtotal_dec;
        let line_discount = discount_dec * line_share;

        let discounted_unit = Decimal::from(line.unit_price) - line_discount / quantity_dec;

        line.discounted_unit_price = discounted_unit
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u64()
            .unwrap_or(0);
    }

    // The reported totals derive from the rounded lines, never the
    // other way round, so an order record always equals the sum of its
    // line snapshots.
    let total: u64 = lines
        .iter()
        .map(|line| line.discounted_unit_price * u64::from(line.quantity))
        .sum();

    PricedSelection {
        subtotal,
        discount: subtotal.saturating_sub(total),
        total,
        lines,
    }
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;
    use testresult::TestResult;

    use crate::catalog::Product;

    use super::*;

    fn product(id: u32, new_price: u64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("product-{id}"),
            images: Vec::new(),
            sizes: smallvec!["M".to_string(), "L".to_string()],
            category: "apparel".to_string(),
            new_price,
            old_price: new_price,
        }
    }

    fn key(id: u32, size: &str) -> SelectionKey {
        SelectionKey::new(ProductId::new(id), size)
    }

    #[test]
    fn selection_key_parses_wire_form() -> TestResult {
        let parsed: SelectionKey = "101-M".parse()?;

        assert_eq!(parsed, key(101, "M"));
        assert_eq!(parsed.to_string(), "101-M");

        Ok(())
    }

    #[test]
    fn selection_key_rejects_malformed_input() {
        assert_eq!(
            "101".parse::<SelectionKey>(),
            Err(SelectionKeyError::MissingSeparator)
        );
        assert_eq!(
            "abc-M".parse::<SelectionKey>(),
            Err(SelectionKeyError::InvalidProductId)
        );
    }

    #[test]
    fn single_line_worked_example() {
        // cart {101: {M: 2}}, unit $20.00, promo 10%:
        // subtotal 40.00, discount 4.00, total 36.00, unit after 18.00.
        let mut cart = Cart::new();
        cart.increment(ProductId::new(101), "M");
        cart.increment(ProductId::new(101), "M");

        let catalog = Catalog::from_products([product(101, 2000)]);

        let priced = price_selection(
            &cart,
            &[key(101, "M")],
            &catalog,
            Some(Discount::Percent(10)),
        );

        assert_eq!(priced.subtotal, 4000);
        assert_eq!(priced.discount, 400);
        assert_eq!(priced.total, 3600);
        assert_eq!(priced.lines.len(), 1);
        assert_eq!(
            priced.lines.first().map(|l| l.discounted_unit_price),
            Some(1800)
        );
    }

    #[test]
    fn partial_selection_scales_discount_to_selected_subtotal() {
        // Full cart $40.00, but only the $30.00 line is checked out:
        // the 10% discount is taken from 30.00, not 40.00.
        let mut cart = Cart::new();
        cart.increment(ProductId::new(101), "M");
        cart.increment(ProductId::new(102), "L");

        let catalog = Catalog::from_products([product(101, 3000), product(102, 1000)]);

        let priced = price_selection(
            &cart,
            &[key(101, "M")],
            &catalog,
            Some(Discount::Percent(10)),
        );

        assert_eq!(priced.subtotal, 3000);
        assert_eq!(priced.discount, 300);
        assert_eq!(priced.total, 2700);
    }

    #[test]
    fn empty_selection_returns_zero_totals() {
        let cart = Cart::new();
        let catalog = Catalog::from_products([product(101, 2000)]);

        let priced = price_selection(&cart, &[], &catalog, Some(Discount::Percent(10)));

        assert_eq!(priced, PricedSelection::default());
    }

    #[test]
    fn stale_catalog_reference_contributes_zero() {
        let mut cart = Cart::new();
        cart.increment(ProductId::new(999), "M");
        cart.increment(ProductId::new(101), "M");

        let catalog = Catalog::from_products([product(101, 2000)]);

        let priced = price_selection(&cart, &[key(999, "M"), key(101, "M")], &catalog, None);

        assert_eq!(priced.subtotal, 2000);
        assert_eq!(priced.lines.len(), 1);
    }

    #[test]
    fn all_lines_stale_never_divides_by_zero() {
        let mut cart = Cart::new();
        cart.increment(ProductId::new(999), "M");

        let catalog = Catalog::from_products([product(101, 2000)]);

        let priced = price_selection(
            &cart,
            &[key(999, "M")],
            &catalog,
            Some(Discount::Percent(50)),
        );

        assert_eq!(priced, PricedSelection::default());
    }

    #[test]
    fn unselected_lines_never_contribute() {
        let mut cart = Cart::new();
        cart.increment(ProductId::new(101), "M");
        cart.increment(ProductId::new(102), "L");

        let catalog = Catalog::from_products([product(101, 3000), product(102, 1000)]);

        let full = cart_subtotal(&cart, &catalog);
        let priced = price_selection(&cart, &[key(102, "L")], &catalog, None);

        assert_eq!(full, 4000);
        assert_eq!(priced.subtotal, 1000);
    }

    #[test]
    fn total_equals_sum_of_rounded_line_totals() {
        // Odd prices and multi-unit quantities under awkward
        // percentages produce fractional per-line discounts; whatever
        // the per-line rounding does, the reported totals must match
        // the line snapshots exactly.
        let mut cart = Cart::new();

        for (id, quantity) in [(101, 3_u32), (102, 1), (103, 2), (104, 5)] {
            for _ in 0..quantity {
                cart.increment(ProductId::new(id), "M");
            }
        }

        let catalog = Catalog::from_products([
            product(101, 1999),
            product(102, 333),
            product(103, 1051),
            product(104, 7499),
        ]);

        let selection = [key(101, "M"), key(102, "M"), key(103, "M"), key(104, "M")];

        for percent in [1_u8, 7, 33, 50, 99] {
            let priced = price_selection(
                &cart,
                &selection,
                &catalog,
                Some(Discount::Percent(percent)),
            );

            let rounded_sum: u64 = priced
                .lines
                .iter()
                .map(|line| line.discounted_unit_price * u64::from(line.quantity))
                .sum();

            assert_eq!(
                rounded_sum, priced.total,
                "{percent}% total must equal the sum of its lines"
            );
            assert_eq!(
                priced.discount,
                priced.subtotal - priced.total,
                "{percent}% discount must account for the rounded lines"
            );
        }
    }

    #[test]
    fn no_discount_keeps_unit_prices_unchanged() {
        let mut cart = Cart::new();
        cart.increment(ProductId::new(101), "M");

        let catalog = Catalog::from_products([product(101, 2000)]);

        let priced = price_selection(&cart, &[key(101, "M")], &catalog, None);

        assert_eq!(priced.discount, 0);
        assert_eq!(priced.total, priced.subtotal);
        assert_eq!(
            priced.lines.first().map(|l| l.discounted_unit_price),
            Some(2000)
        );
    }
}
