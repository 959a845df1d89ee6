//! Get Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use plaza::catalog::ProductId;
use plaza_app::domain::products::records::ProductRecord;

use crate::{extensions::*, products::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// Numeric product identifier
    pub id: u32,

    /// Display name
    pub name: String,

    /// Image paths
    pub images: Vec<String>,

    /// Available sizes
    pub sizes: Vec<String>,

    /// Category slug
    pub category: String,

    /// Long description
    pub description: String,

    /// Current price in minor units
    pub new_price: u64,

    /// Original price in minor units
    pub old_price: u64,

    /// The date and time the product was created
    pub created_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            id: product.id.get(),
            name: product.name,
            images: product.images,
            sizes: product.sizes,
            category: product.category,
            description: product.description,
            new_price: product.new_price,
            old_price: product.old_price,
            created_at: product.created_at.to_string(),
        }
    }
}

/// Get Product Handler
///
/// Returns a product.
#[endpoint(tags("products"), summary = "Get Product")]
pub(crate) async fn handler(
    product: PathParam<u32>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .get_product(ProductId::new(product.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use plaza_app::domain::products::{MockProductsService, ProductsServiceError};

    use crate::{
        products::handlers::make_product,
        test_helpers::{StateBuilder, public_service},
    };

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        public_service(
            StateBuilder::default().products(products).build(),
            Router::with_path("products/{product}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_get_returns_200() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_get_product()
            .once()
            .withf(|id| *id == ProductId::new(101))
            .return_once(|_| Ok(make_product(101, 2000)));

        let res = TestClient::get("http://example.com/products/101")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_product_returns_404() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_get_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::NotFound));

        let res = TestClient::get("http://example.com/products/999")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
