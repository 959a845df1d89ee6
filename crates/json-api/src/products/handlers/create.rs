//! Create Product Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use plaza_app::domain::products::data::NewProduct;

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
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

impl From<CreateProductRequest> for NewProduct {
    fn from(request: CreateProductRequest) -> Self {
        NewProduct {
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

/// Product Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductCreatedResponse {
    /// Allocated numeric product id
    pub id: u32,
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::CONFLICT, description = "Product already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _account = depot.account_uuid_or_401()?;

    let id = state
        .app
        .products
        .create_product(json.into_inner().into())
        .await
        .map_err(into_status_error)?
        .id;

    res.add_header(LOCATION, format!("/products/{id}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(ProductCreatedResponse { id: id.get() }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use plaza_app::domain::products::{MockProductsService, ProductsServiceError};

    use crate::{
        products::handlers::make_product,
        test_helpers::{StateBuilder, authed_service},
    };

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        authed_service(
            StateBuilder::default().products(products).build(),
            Router::with_path("products").post(handler),
        )
    }

    fn request_body() -> serde_json::Value {
        json!({
            "name": "Peplum Blouse",
            "category": "women",
            "new_price": 2000,
            "old_price": 2500,
        })
    }

    #[tokio::test]
    async fn test_create_product_success() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .withf(|new| new.name == "Peplum Blouse" && new.new_price == 2000)
            .return_once(|_| Ok(make_product(101, 2000)));

        let mut res = TestClient::post("http://example.com/products")
            .json(&request_body())
            .send(&make_service(products))
            .await;

        let body: ProductCreatedResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some("/products/101"));
        assert_eq!(body.id, 101);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_duplicate_name_returns_409() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/products")
            .json(&request_body())
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
