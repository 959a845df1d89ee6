//! Auth service errors.

use sqlx::Error;
use thiserror::Error;

use crate::auth::ApiTokenError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("token is malformed")]
    Malformed(#[from] ApiTokenError),

    #[error("token has expired")]
    Expired,

    #[error("token not found")]
    NotFound,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}
