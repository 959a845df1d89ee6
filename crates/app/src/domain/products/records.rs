//! Product Records

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use plaza::catalog::{Catalog, Product, ProductId};

/// Product Record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    pub images: Vec<String>,
    pub sizes: Vec<String>,
    pub category: String,
    pub description: String,
    /// Current discounted price in minor units; authoritative for pricing.
    pub new_price: u64,
    /// Original price in minor units; display only.
    pub old_price: u64,
    pub created_at: Timestamp,
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        Product {
            id: record.id,
            name: record.name,
            images: record.images,
            sizes: SmallVec::from_vec(record.sizes),
            category: record.category,
            new_price: record.new_price,
            old_price: record.old_price,
        }
    }
}

/// Builds the pricing catalog view from stored product records.
#[must_use]
pub fn catalog_from_records(records: Vec<ProductRecord>) -> Catalog {
    Catalog::from_products(records.into_iter().map(Product::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_view_uses_new_price() {
        let record = ProductRecord {
            id: ProductId::new(101),
            name: "shirt".to_string(),
            images: Vec::new(),
            sizes: vec!["M".to_string()],
            category: "apparel".to_string(),
            description: String::new(),
            new_price: 2000,
            old_price: 2500,
            created_at: Timestamp::UNIX_EPOCH,
        };

        let catalog = catalog_from_records(vec![record]);

        assert_eq!(catalog.unit_price(ProductId::new(101)), Some(2000));
    }
}
