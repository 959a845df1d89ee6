//! Account Records

use jiff::Timestamp;
use serde::Serialize;

use crate::uuids::TypedUuid;

/// Account UUID
pub type AccountUuid = TypedUuid<AccountRecord>;

/// A customer account. Password and credential mechanics live outside
/// this system; accounts authenticate with bearer API tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountRecord {
    pub uuid: AccountUuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub created_at: Timestamp,
}
