//! Carts service.

use async_trait::async_trait;
use mockall::automock;

use plaza::{carts::Cart, catalog::ProductId};

use crate::{
    database::Db,
    domain::{accounts::records::AccountUuid, carts::errors::CartsServiceError},
};

use super::repository::PgCartsRepository;

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    repository: PgCartsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCartsRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, account: AccountUuid) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.repository.get_cart(&mut tx, account).await?;

        tx.commit().await?;

        Ok(cart.unwrap_or_default())
    }

    async fn put_cart(&self, account: AccountUuid, cart: Cart) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.repository.upsert_cart(&mut tx, account, &cart).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn add_item(
        &self,
        account: AccountUuid,
        product: ProductId,
        size: &str,
    ) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut cart = self
            .repository
            .get_cart(&mut tx, account)
            .await?
            .unwrap_or_default();

        cart.increment(product, size);

        self.repository.upsert_cart(&mut tx, account, &cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn remove_item(
        &self,
        account: AccountUuid,
        product: ProductId,
        size: &str,
    ) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut cart = self
            .repository
            .get_cart(&mut tx, account)
            .await?
            .unwrap_or_default();

        cart.decrement(product, size);

        self.repository.upsert_cart(&mut tx, account, &cart).await?;

        tx.commit().await?;

        Ok(cart)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the account's cart document; empty when never written.
    async fn get_cart(&self, account: AccountUuid) -> Result<Cart, CartsServiceError>;

    /// Overwrite the entire cart document. The only write shape.
    async fn put_cart(&self, account: AccountUuid, cart: Cart) -> Result<(), CartsServiceError>;

    /// Add one unit of a (product, size) line and persist the result.
    async fn add_item(
        &self,
        account: AccountUuid,
        product: ProductId,
        size: &str,
    ) -> Result<Cart, CartsServiceError>;

    /// Remove one unit of a (product, size) line and persist the
    /// result. A no-op for absent lines.
    async fn remove_item(
        &self,
        account: AccountUuid,
        product: ProductId,
        size: &str,
    ) -> Result<Cart, CartsServiceError>;
}
