//! Accounts service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::accounts::{
        data::NewAccount,
        errors::AccountsServiceError,
        records::{AccountRecord, AccountUuid},
        repository::PgAccountsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgAccountsService {
    db: Db,
    repository: PgAccountsRepository,
}

impl PgAccountsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAccountsRepository::new(),
        }
    }
}

#[async_trait]
impl AccountsService for PgAccountsService {
    async fn get_account(
        &self,
        account: AccountUuid,
    ) -> Result<AccountRecord, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_account(&mut tx, account).await?;

        tx.commit().await?;

        Ok(record)
    }

    #[tracing::instrument(name = "accounts.service.create_account", skip(self, account), err)]
    async fn create_account(
        &self,
        account: NewAccount,
    ) -> Result<AccountRecord, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_account(&mut tx, &account).await?;

        tx.commit().await?;

        info!(account = %created.uuid, "created account");

        Ok(created)
    }

    #[tracing::instrument(name = "accounts.service.delete_account", skip(self), err)]
    async fn delete_account(&self, account: AccountUuid) -> Result<(), AccountsServiceError> {
        // Orders and the cart document go in the same transaction as
        // the account row, so a failure part-way leaves everything.
        let mut tx = self.db.begin().await?;

        let orders_deleted = self.repository.delete_account_orders(&mut tx, account).await?;
        self.repository.delete_account_cart(&mut tx, account).await?;

        let rows_affected = self.repository.delete_account(&mut tx, account).await?;

        if rows_affected == 0 {
            return Err(AccountsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(account = %account, orders_deleted, "deleted account");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AccountsService: Send + Sync {
    /// Fetches an account's profile.
    async fn get_account(&self, account: AccountUuid)
    -> Result<AccountRecord, AccountsServiceError>;

    /// Registers an account. Email collisions surface as
    /// [`AccountsServiceError::AlreadyExists`].
    async fn create_account(
        &self,
        account: NewAccount,
    ) -> Result<AccountRecord, AccountsServiceError>;

    /// Removes an account together with its orders and cart, all in
    /// one transaction.
    async fn delete_account(&self, account: AccountUuid) -> Result<(), AccountsServiceError>;
}
