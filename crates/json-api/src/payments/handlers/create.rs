//! Create Payment Intent Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, payments::errors::into_status_error, state::State};

/// Create Payment Intent Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateIntentRequest {
    /// Amount to charge, in minor units.
    pub amount: u64,
}

/// Payment Intent Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentIntentResponse {
    /// Provider-side intent id.
    pub id: String,
    /// Secret the client uses to confirm the charge.
    pub client_secret: String,
    /// Amount to charge, in minor units.
    pub amount: u64,
}

/// Create Payment Intent Handler
#[endpoint(
    tags("payments"),
    summary = "Create Payment Intent",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Payment intent created"),
        (status_code = StatusCode::BAD_REQUEST, description = "The provider declined the charge"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateIntentRequest>,
    depot: &mut Depot,
) -> Result<Json<PaymentIntentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _account = depot.account_uuid_or_401()?;

    let intent = state
        .app
        .payments
        .create_intent(json.into_inner().amount)
        .await
        .map_err(into_status_error)?;

    Ok(Json(PaymentIntentResponse {
        id: intent.id,
        client_secret: intent.client_secret,
        amount: intent.amount,
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use plaza_app::payments::{MockPaymentsService, PaymentIntent, PaymentsError};

    use crate::test_helpers::{StateBuilder, authed_service};

    use super::*;

    fn make_service(payments: MockPaymentsService) -> Service {
        authed_service(
            StateBuilder::default().payments(payments).build(),
            Router::with_path("payments/intent").post(handler),
        )
    }

    #[tokio::test]
    async fn test_create_intent_returns_the_client_secret() -> TestResult {
        let mut payments = MockPaymentsService::new();

        payments
            .expect_create_intent()
            .once()
            .withf(|amount| *amount == 3600)
            .return_once(|amount| {
                Ok(PaymentIntent {
                    id: "pi_123".to_string(),
                    client_secret: "pi_123_secret".to_string(),
                    amount,
                })
            });

        let mut res = TestClient::post("http://example.com/payments/intent")
            .json(&json!({ "amount": 3600 }))
            .send(&make_service(payments))
            .await;

        let body: PaymentIntentResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.client_secret, "pi_123_secret");
        assert_eq!(body.amount, 3600);

        Ok(())
    }

    #[tokio::test]
    async fn test_declined_charge_maps_the_provider_code_to_a_friendly_message() -> TestResult {
        let mut payments = MockPaymentsService::new();

        payments.expect_create_intent().once().return_once(|_| {
            Err(PaymentsError::Declined {
                code: Some("insufficient_funds".to_string()),
                message: "Your card has insufficient funds.".to_string(),
            })
        });

        let res = TestClient::post("http://example.com/payments/intent")
            .json(&json!({ "amount": 3600 }))
            .send(&make_service(payments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_provider_outage_is_a_500() -> TestResult {
        let mut payments = MockPaymentsService::new();

        payments.expect_create_intent().once().return_once(|_| {
            Err(PaymentsError::UnexpectedResponse(
                "<html>bad gateway</html>".to_string(),
            ))
        });

        let res = TestClient::post("http://example.com/payments/intent")
            .json(&json!({ "amount": 3600 }))
            .send(&make_service(payments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
