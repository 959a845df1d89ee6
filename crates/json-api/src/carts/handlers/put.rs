//! Put Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use plaza::carts::Cart;

use crate::{
    carts::{errors::into_status_error, handlers::CartBody},
    extensions::*,
    state::State,
};

/// Put Cart Handler
///
/// Replaces the entire cart document. There is no partial-update
/// shape; clients send the full recomputed cart on every mutation.
#[endpoint(tags("carts"), summary = "Replace Cart", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    json: JsonBody<CartBody>,
    depot: &mut Depot,
) -> Result<Json<CartBody>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let account = depot.account_uuid_or_401()?;

    let cart = Cart::try_from(json.into_inner())?;

    state
        .app
        .carts
        .put_cart(account, cart.clone())
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
