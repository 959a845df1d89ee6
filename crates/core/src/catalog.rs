//! Catalog
//!
//! Read-only product lookup. The catalog is owned and mutated by the
//! catalog-management subsystem; the pricing slice only reads it. The
//! authoritative unit price for all pricing math is [`Product::new_price`].

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Numeric product identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct ProductId(u32);

impl ProductId {
    /// Wraps a raw numeric identifier.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw numeric identifier.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// A catalog product snapshot. Prices are minor currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Numeric product identifier.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Image URLs.
    pub images: Vec<String>,

    /// Available size labels; may be empty for no-size products.
    pub sizes: SmallVec<[String; 6]>,

    /// Category label.
    pub category: String,

    /// Current discounted price in minor units. Authoritative for
    /// pricing.
    pub new_price: u64,

    /// Current original price in minor units. Display only.
    pub old_price: u64,
}

/// An id-indexed view over catalog products.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: FxHashMap<ProductId, Product>,
}

impl Catalog {
    /// Builds a catalog index from a product list.
    #[must_use]
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            products: products
                .into_iter()
                .map(|product| (product.id, product))
                .collect(),
        }
    }

    /// Looks up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    /// Current unit price for a product, in minor units. `None` when
    /// the product is missing from the catalog.
    #[must_use]
    pub fn unit_price(&self, id: ProductId) -> Option<u64> {
        self.products.get(&id).map(|product| product.new_price)
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog holds no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use super::*;

    pub(crate) fn product(id: u32, new_price: u64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("product-{id}"),
            images: Vec::new(),
            sizes: smallvec!["S".to_string(), "M".to_string(), "L".to_string()],
            category: "apparel".to_string(),
            new_price,
            old_price: new_price,
        }
    }

    #[test]
    fn unit_price_returns_new_price() {
        let catalog = Catalog::from_products([product(101, 2000), product(102, 1000)]);

        assert_eq!(catalog.unit_price(ProductId::new(101)), Some(2000));
        assert_eq!(catalog.unit_price(ProductId::new(102)), Some(1000));
    }

    #[test]
    fn unit_price_missing_product_returns_none() {
        let catalog = Catalog::from_products([product(101, 2000)]);

        assert_eq!(catalog.unit_price(ProductId::new(999)), None);
    }

    #[test]
    fn from_products_indexes_by_id() {
        let catalog = Catalog::from_products([product(101, 2000)]);

        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.get(ProductId::new(101)).map(|p| p.name.as_str()),
            Some("product-101")
        );
    }
}
