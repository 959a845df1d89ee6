//! Payments errors.

use thiserror::Error;

/// Errors that can occur when talking to the payment provider.
#[derive(Debug, Error)]
pub enum PaymentsError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider rejected the charge. Carries the provider's decline
    /// code and raw message for user-facing mapping.
    #[error("payment declined: {message}")]
    Declined {
        code: Option<String>,
        message: String,
    },

    /// The provider returned a non-2xx response or unexpected body.
    #[error("unexpected response from payment provider: {0}")]
    UnexpectedResponse(String),
}
