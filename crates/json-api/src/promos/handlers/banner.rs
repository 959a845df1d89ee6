//! Promo Banner Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use plaza_app::domain::promos::records::PromoRecord;

use crate::{extensions::*, promos::errors::into_status_error, state::State};

/// Promo Banner Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PromoBannerResponse {
    /// Canonical upper-cased code.
    pub code: String,
    /// Discount percentage, zero for fixed-amount promos.
    pub percent: u8,
    /// Minimum qualifying cart subtotal in minor units.
    pub min_cart_value: u64,
}

impl From<PromoRecord> for PromoBannerResponse {
    fn from(record: PromoRecord) -> Self {
        PromoBannerResponse {
            percent: record.discount.percent(),
            code: record.code.to_string(),
            min_cart_value: record.min_cart_value,
        }
    }
}

/// Promo Banner Handler
#[endpoint(
    tags("promos"),
    summary = "Promo Banner",
    responses(
        (status_code = StatusCode::OK, description = "The promo to advertise"),
        (status_code = StatusCode::NOT_FOUND, description = "No active promo"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<PromoBannerResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let promo = state
        .app
        .promos
        .banner_promo()
        .await
        .map_err(into_status_error)?;

    Ok(Json(promo.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use plaza::promos::Discount;
    use plaza_app::domain::promos::{MockPromosService, PromosServiceError};

    use crate::{
        promos::handlers::make_promo,
        test_helpers::{StateBuilder, public_service},
    };

    use super::*;

    fn make_service(promos: MockPromosService) -> Service {
        public_service(
            StateBuilder::default().promos(promos).build(),
            Router::with_path("promos").push(Router::with_path("banner").get(handler)),
        )
    }

    #[tokio::test]
    async fn test_banner_returns_the_advertised_promo() -> TestResult {
        let mut promos = MockPromosService::new();

        promos
            .expect_banner_promo()
            .once()
            .return_once(|| Ok(make_promo("SAVE10", Discount::Percent(10))));

        let mut res = TestClient::get("http://example.com/promos/banner")
            .send(&make_service(promos))
            .await;

        let body: PromoBannerResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.code, "SAVE10");
        assert_eq!(body.percent, 10);

        Ok(())
    }

    #[tokio::test]
    async fn test_banner_without_active_promo_returns_404() -> TestResult {
        let mut promos = MockPromosService::new();

        promos
            .expect_banner_promo()
            .once()
            .return_once(|| Err(PromosServiceError::NotFound));

        let res = TestClient::get("http://example.com/promos/banner")
            .send(&make_service(promos))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
