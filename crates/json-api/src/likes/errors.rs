//! Like Errors

use salvo::http::StatusError;
use tracing::error;

use plaza_app::domain::likes::LikesServiceError;

pub(crate) fn into_status_error(error: LikesServiceError) -> StatusError {
    match error {
        LikesServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        LikesServiceError::InvalidReference => {
            StatusError::bad_request().brief("Invalid like request")
        }
        LikesServiceError::Sql(source) => {
            error!("like storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
