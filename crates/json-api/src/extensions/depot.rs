//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use plaza_app::domain::accounts::records::AccountUuid;

const ACCOUNT_UUID_KEY: &str = "account_uuid";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_account_uuid(&mut self, account: AccountUuid);

    fn account_uuid_or_401(&self) -> Result<AccountUuid, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_account_uuid(&mut self, account: AccountUuid) {
        self.insert(ACCOUNT_UUID_KEY, account);
    }

    fn account_uuid_or_401(&self) -> Result<AccountUuid, StatusError> {
        self.get::<AccountUuid>(ACCOUNT_UUID_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized().brief("Not authenticated"))
    }
}
