//! Cart Item Handlers

pub(crate) mod create;
pub(crate) mod delete;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

/// A single (product, size) cart line reference.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemRequest {
    /// Numeric product identifier
    pub product: u32,

    /// Size label, e.g. `"M"`
    pub size: String,
}
