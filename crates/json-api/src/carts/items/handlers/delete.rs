//! Remove Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use plaza::catalog::ProductId;

use crate::{
    carts::{errors::into_status_error, handlers::CartBody, items::CartItemRequest},
    extensions::*,
    state::State,
};

/// Remove Cart Item Handler
///
/// Removes one unit of a (product, size) line and returns the updated
/// cart document. Removing an absent line is a no-op, not an error.
#[endpoint(
    tags("carts"),
    summary = "Remove Cart Item",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    json: JsonBody<CartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartBody>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let account = depot.account_uuid_or_401()?;

    let item = json.into_inner();

    let cart = state
        .app
        .carts
        .remove_item(account, ProductId::new(item.product), &item.size)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use plaza::carts::Cart;
    use plaza_app::domain::carts::MockCartsService;

    use crate::test_helpers::{StateBuilder, TEST_ACCOUNT_UUID, authed_service};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        authed_service(
            StateBuilder::default().carts(carts).build(),
            Router::with_path("cart/items").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_remove_absent_item_is_a_no_op() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_remove_item()
            .once()
            .withf(|account, product, size| {
                *account == TEST_ACCOUNT_UUID && *product == ProductId::new(999) && size == "XL"
            })
            .return_once(|_, _, _| Ok(Cart::new()));

        let body: serde_json::Value = TestClient::delete("http://example.com/cart/items")
            .json(&serde_json::json!({ "product": 999, "size": "XL" }))
            .send(&make_service(carts))
            .await
            .take_json()
            .await?;

        assert_eq!(body, serde_json::json!({}));

        Ok(())
    }
}
