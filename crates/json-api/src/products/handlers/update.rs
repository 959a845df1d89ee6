//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use plaza::catalog::ProductId;
use plaza_app::domain::products::data::ProductUpdate;

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Update Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProductRequest {
    pub name: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub new_price: u64,
    pub old_price: u64,
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(request: UpdateProductRequest) -> Self {
        ProductUpdate {
            name: request.name,
            images: request.images,
            sizes: request.sizes,
            category: request.category,
            description: request.description,
            new_price: request.new_price,
            old_price: request.old_price,
        }
    }
}

/// Update Product Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    product: PathParam<u32>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _account = depot.account_uuid_or_401()?;

    let updated = state
        .app
        .products
        .update_product(ProductId::new(product.into_inner()), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}
