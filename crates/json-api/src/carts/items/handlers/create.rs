//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use plaza::catalog::ProductId;

use crate::{
    carts::{errors::into_status_error, handlers::CartBody, items::CartItemRequest},
    extensions::*,
    state::State,
};

/// Add Cart Item Handler
///
/// Adds one unit of a (product, size) line and returns the updated
/// cart document.
#[endpoint(tags("carts"), summary = "Add Cart Item", security(("bearer_auth" = [])))]
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
        .add_item(account, ProductId::new(item.product), &item.size)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
