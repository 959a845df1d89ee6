//! Apply Promo Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use plaza_app::domain::promos::data::AppliedPromo;

use crate::{extensions::*, promos::errors::into_status_error, state::State};

/// Apply Promo Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ApplyPromoRequest {
    /// Code as entered; matching is case-insensitive.
    pub code: String,
    /// Current cart subtotal in minor units.
    pub cart_subtotal: u64,
}

/// Applied Promo Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AppliedPromoResponse {
    /// Discount percentage, zero for fixed-amount promos.
    pub percent: u8,
    /// Discount amount in minor units.
    pub discount: u64,
    /// Subtotal after the discount, in minor units.
    pub new_total: u64,
}

impl From<AppliedPromo> for AppliedPromoResponse {
    fn from(applied: AppliedPromo) -> Self {
        AppliedPromoResponse {
            percent: applied.percent,
            discount: applied.discount,
            new_total: applied.new_total,
        }
    }
}

/// Apply Promo Handler
#[endpoint(
    tags("promos"),
    summary = "Apply Promo",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "The promo applied to the submitted subtotal"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid code or subtotal below the promo minimum"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ApplyPromoRequest>,
    depot: &mut Depot,
) -> Result<Json<AppliedPromoResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _account = depot.account_uuid_or_401()?;

    let request = json.into_inner();

    let applied = state
        .app
        .promos
        .apply_promo(&request.code, request.cart_subtotal)
        .await
        .map_err(into_status_error)?;

    Ok(Json(applied.into()))
}
