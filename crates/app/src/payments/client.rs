//! HTTP client for the hosted payment-intent API.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use crate::payments::errors::PaymentsError;

/// Configuration for connecting to the payment provider.
#[derive(Debug, Clone)]
pub struct PaymentsConfig {
    /// Provider API base URL, e.g. `"https://api.stripe.com"`.
    pub base_url: String,

    /// Secret API key sent as a bearer credential.
    pub secret_key: String,
}

/// A created payment intent. The client secret is handed to the
/// storefront to confirm the charge; the server never sees card data.
#[derive(Debug, Clone)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
    /// Amount to charge, in minor units.
    pub amount: u64,
}

#[derive(Debug, Clone)]
pub struct HttpPaymentsClient {
    config: PaymentsConfig,
    http: Client,
}

impl HttpPaymentsClient {
    #[must_use]
    pub fn new(config: PaymentsConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl PaymentsService for HttpPaymentsClient {
    async fn create_intent(&self, amount_minor: u64) -> Result<PaymentIntent, PaymentsError> {
        let url = format!("{}/v1/payment_intents", self.config.base_url);

        let body = [
            ("amount", amount_minor.to_string()),
            ("currency", "usd".to_string()),
        ];

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.secret_key)
            .form(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();

            if let Ok(parsed) = response.json::<ErrorResponse>().await {
                return Err(PaymentsError::Declined {
                    code: parsed.error.code,
                    message: parsed.error.message,
                });
            }

            return Err(PaymentsError::UnexpectedResponse(format!(
                "payment intent request failed with status {status}"
            )));
        }

        let parsed: IntentResponse = response.json().await?;

        info!(intent = %parsed.id, amount = amount_minor, "created payment intent");

        Ok(PaymentIntent {
            id: parsed.id,
            client_secret: parsed.client_secret,
            amount: amount_minor,
        })
    }
}

#[derive(Debug, Deserialize)]
struct IntentResponse {
    id: String,
    client_secret: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: String,
}

#[automock]
#[async_trait]
pub trait PaymentsService: Send + Sync {
    /// Requests a charge for the given amount in minor units.
    async fn create_intent(&self, amount_minor: u64) -> Result<PaymentIntent, PaymentsError>;
}
