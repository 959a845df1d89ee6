//! Product Data

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub images: Vec<String>,
    pub sizes: Vec<String>,
    pub category: String,
    pub description: String,
    pub new_price: u64,
    pub old_price: u64,
}

/// Product Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    pub images: Vec<String>,
    pub sizes: Vec<String>,
    pub category: String,
    pub description: String,
    pub new_price: u64,
    pub old_price: u64,
}
