//! Promo Errors

use salvo::http::StatusError;
use tracing::error;

use plaza_app::domain::promos::PromosServiceError;

pub(crate) fn into_status_error(error: PromosServiceError) -> StatusError {
    match error {
        PromosServiceError::AlreadyExists => StatusError::conflict().brief("Promo already exists"),
        PromosServiceError::NotFound => StatusError::not_found().brief("Promo not found"),
        PromosServiceError::InvalidCode => StatusError::bad_request().brief("Invalid promo code"),
        PromosServiceError::BelowMinimum { minimum } => StatusError::bad_request().brief(format!(
            "Minimum cart value for this promo code is {minimum} minor units"
        )),
        PromosServiceError::MissingRequiredData | PromosServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid promo payload")
        }
        PromosServiceError::Sql(source) => {
            error!("promo storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
