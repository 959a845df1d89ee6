//! Toggle Like Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use plaza::catalog::ProductId;
use plaza_app::domain::likes::data::LikeStatus;

use crate::{extensions::*, likes::errors::into_status_error, state::State};

/// Like Status Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LikeStatusResponse {
    /// Whether the account now likes the product.
    pub liked: bool,

    /// Total number of accounts liking the product.
    pub likes_count: u64,
}

impl From<LikeStatus> for LikeStatusResponse {
    fn from(status: LikeStatus) -> Self {
        LikeStatusResponse {
            liked: status.liked,
            likes_count: status.likes_count,
        }
    }
}

/// Toggle Like Handler
///
/// Flips the authenticated account's like on a product.
#[endpoint(
    tags("likes"),
    summary = "Toggle Like",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "The like state after the toggle"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<u32>,
    depot: &mut Depot,
) -> Result<Json<LikeStatusResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let account = depot.account_uuid_or_401()?;

    let status = state
        .app
        .likes
        .toggle_like(account, ProductId::new(product.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(status.into()))
}
