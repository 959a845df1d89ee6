//! Update Promo Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, promos::errors::into_status_error, state::State};

/// Update Promo Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdatePromoRequest {
    /// Whether the promo can currently be applied.
    pub active: bool,
}

/// Update Promo Handler
#[endpoint(
    tags("promos"),
    summary = "Update Promo",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Promo updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Promo not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    code: PathParam<String>,
    json: JsonBody<UpdatePromoRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _account = depot.account_uuid_or_401()?;

    state
        .app
        .promos
        .set_active(&code.into_inner(), json.into_inner().active)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::NO_CONTENT);

    Ok(())
}
