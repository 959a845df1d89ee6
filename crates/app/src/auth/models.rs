//! Auth data models.

use jiff::Timestamp;
use uuid::Uuid;

use crate::{auth::ApiTokenVersion, domain::accounts::records::AccountUuid};

/// API token data used during bearer authentication.
#[derive(Debug, Clone)]
pub(crate) struct ActiveApiToken {
    /// Account that owns this API token.
    pub account_uuid: AccountUuid,

    /// Token format/hash version.
    pub version: ApiTokenVersion,

    /// Hex SHA-256 digest of the token secret material.
    pub token_hash: String,

    pub expires_at: Option<Timestamp>,
}

/// New API token persistence payload.
#[derive(Debug, Clone)]
pub struct NewApiToken {
    pub uuid: Uuid,
    pub account_uuid: AccountUuid,
    pub version: ApiTokenVersion,
    pub token_hash: String,
    pub expires_at: Option<Timestamp>,
}

/// API token issuance result with one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedApiToken {
    pub token: String,
    pub uuid: Uuid,
    pub account_uuid: AccountUuid,
    pub expires_at: Option<Timestamp>,
}
