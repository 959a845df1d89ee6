//! Get Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{errors::into_status_error, handlers::CartBody},
    extensions::*,
    state::State,
};

/// Get Cart Handler
///
/// Returns the authenticated account's cart document, empty if the
/// account has never written one.
#[endpoint(tags("carts"), summary = "Get Cart", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartBody>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let account = depot.account_uuid_or_401()?;

    let cart = state
        .app
        .carts
        .get_cart(account)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use plaza::{carts::Cart, catalog::ProductId};
    use plaza_app::domain::carts::MockCartsService;

    use crate::test_helpers::{StateBuilder, TEST_ACCOUNT_UUID, authed_service};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        authed_service(
            StateBuilder::default().carts(carts).build(),
            Router::with_path("cart").get(handler),
        )
    }

    #[tokio::test]
    async fn test_get_cart_returns_wire_shape() -> TestResult {
        let mut cart = Cart::new();
        cart.increment(ProductId::new(101), "M");
        cart.increment(ProductId::new(101), "M");

        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .withf(|account| *account == TEST_ACCOUNT_UUID)
            .return_once(move |_| Ok(cart));

        let body: serde_json::Value = TestClient::get("http://example.com/cart")
            .send(&make_service(carts))
            .await
            .take_json()
            .await?;

        assert_eq!(body, serde_json::json!({ "101": { "M": 2 } }));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_cart_empty_returns_empty_object() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .return_once(|_| Ok(Cart::new()));

        let body: serde_json::Value = TestClient::get("http://example.com/cart")
            .send(&make_service(carts))
            .await
            .take_json()
            .await?;

        assert_eq!(body, serde_json::json!({}));

        Ok(())
    }
}
