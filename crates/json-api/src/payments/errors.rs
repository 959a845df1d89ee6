//! Payment Errors

use salvo::http::StatusError;
use tracing::error;

use plaza_app::payments::{PaymentsError, decline_message};

pub(crate) fn into_status_error(error: PaymentsError) -> StatusError {
    match error {
        PaymentsError::Declined { code, message } => StatusError::bad_request()
            .brief(decline_message(code.as_deref(), &message).to_string()),
        PaymentsError::Http(source) => {
            error!("payment provider request failed: {source}");

            StatusError::internal_server_error()
        }
        PaymentsError::UnexpectedResponse(body) => {
            error!("unexpected payment provider response: {body}");

            StatusError::internal_server_error()
        }
    }
}
