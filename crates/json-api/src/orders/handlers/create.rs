//! Create Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use plaza_app::domain::orders::data::NewOrder;

use crate::{
    extensions::*,
    orders::{
        errors::into_status_error,
        handlers::{OrderLineBody, OrderResponse},
    },
    state::State,
};

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    pub items: Vec<OrderLineBody>,
    /// Pre-discount subtotal in minor units.
    pub subtotal: u64,
    /// Discount amount in minor units.
    #[serde(default)]
    pub discount: u64,
    /// Discount percentage applied at checkout.
    #[serde(default)]
    pub discount_percent: u8,
    /// Amount charged by the payment collaborator, in minor units.
    pub final_amount: u64,
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(request: CreateOrderRequest) -> Self {
        NewOrder {
            items: request.items.into_iter().map(Into::into).collect(),
            subtotal: request.subtotal,
            discount: request.discount,
            discount_percent: request.discount_percent,
            final_amount: request.final_amount,
        }
    }
}

/// Create Order Handler
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order recorded"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty or invalid order"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let account = depot.account_uuid_or_401()?;

    let order = state
        .app
        .orders
        .create_order(account, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}
