//! Create Promo Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use plaza::promos::Discount;
use plaza_app::domain::promos::data::NewPromo;

use crate::{extensions::*, promos::errors::into_status_error, state::State};

/// Create Promo Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreatePromoRequest {
    /// Raw code; normalised to upper case on insert.
    pub code: String,
    pub discount_type: DiscountType,
    /// Percentage for `percent`, minor units for `fixed`.
    pub amount: u64,
    /// Minimum qualifying cart subtotal in minor units.
    #[serde(default)]
    pub min_cart_value: u64,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Discount Type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum DiscountType {
    Percent,
    Fixed,
}

impl CreatePromoRequest {
    fn into_new_promo(self) -> Result<NewPromo, StatusError> {
        let discount = match self.discount_type {
            DiscountType::Percent => {
                let percent = u8::try_from(self.amount)
                    .ok()
                    .filter(|percent| *percent <= 100)
                    .ok_or_else(|| {
                        StatusError::bad_request().brief("Percentage must be between 0 and 100")
                    })?;

                Discount::Percent(percent)
            }
            DiscountType::Fixed => Discount::Fixed(self.amount),
        };

        Ok(NewPromo {
            code: self.code,
            discount,
            min_cart_value: self.min_cart_value,
            active: self.active,
        })
    }
}

/// Created Promo Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PromoCreatedResponse {
    /// Canonical upper-cased code.
    pub code: String,
}

/// Create Promo Handler
#[endpoint(
    tags("promos"),
    summary = "Create Promo",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Promo created"),
        (status_code = StatusCode::CONFLICT, description = "Promo already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreatePromoRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PromoCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _account = depot.account_uuid_or_401()?;

    let promo = state
        .app
        .promos
        .create_promo(json.into_inner().into_new_promo()?)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(PromoCreatedResponse {
        code: promo.code.to_string(),
    }))
}
