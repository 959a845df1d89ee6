//! Promos service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use plaza::promos::PromoError;

#[derive(Debug, Error)]
pub enum PromosServiceError {
    #[error("promo already exists")]
    AlreadyExists,

    #[error("promo not found")]
    NotFound,

    /// Absent and inactive codes surface identically.
    #[error("invalid promo code")]
    InvalidCode,

    #[error("minimum cart value for this promo code is {minimum} minor units")]
    BelowMinimum { minimum: u64 },

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for PromosServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}

impl From<PromoError> for PromosServiceError {
    fn from(error: PromoError) -> Self {
        match error {
            PromoError::InvalidCode => Self::InvalidCode,
            PromoError::BelowMinimum { minimum } => Self::BelowMinimum { minimum },
        }
    }
}
