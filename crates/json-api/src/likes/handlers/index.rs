//! List Liked Products Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*, likes::errors::into_status_error, products::handlers::get::ProductResponse,
    state::State,
};

/// List Liked Products Handler
#[endpoint(
    tags("likes"),
    summary = "List Liked Products",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "The account's liked products, newest first"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let account = depot.account_uuid_or_401()?;

    let products = state
        .app
        .likes
        .list_liked_products(account)
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}
