//! Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, products::get::ProductResponse, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The list of products
    pub products: Vec<ProductResponse>,
}

/// Product Index Handler
///
/// Returns the catalog, optionally filtered by a name search term.
#[endpoint(tags("products"), summary = "List Products")]
pub(crate) async fn handler(
    search: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = match search.into_inner() {
        Some(term) if !term.trim().is_empty() => state
            .app
            .products
            .search_products(term.trim())
            .await
            .or_500("failed to search products")?,
        _ => state
            .app
            .products
            .list_products()
            .await
            .or_500("failed to fetch products")?,
    };

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
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
            Router::with_path("products").get(handler),
        )
    }

    #[tokio::test]
    async fn test_index_returns_products() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(|| Ok(vec![make_product(101, 2000), make_product(102, 1000)]));

        let response: ProductsResponse = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await
            .take_json()
            .await?;

        assert_eq!(response.products.len(), 2, "expected two products");
        assert_eq!(response.products.first().map(|p| p.id), Some(101));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_with_search_term_uses_search() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_search_products()
            .once()
            .withf(|term| term == "blouse")
            .return_once(|_| Ok(vec![make_product(101, 2000)]));

        products.expect_list_products().never();

        let response: ProductsResponse =
            TestClient::get("http://example.com/products?search=blouse")
                .send(&make_service(products))
                .await
                .take_json()
                .await?;

        assert_eq!(response.products.len(), 1, "expected one hit");

        Ok(())
    }

    #[tokio::test]
    async fn test_index_service_error_returns_500() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(|| Err(ProductsServiceError::InvalidData));

        let res = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
