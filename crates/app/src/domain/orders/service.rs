//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        accounts::records::AccountUuid,
        orders::{
            data::NewOrder, errors::OrdersServiceError, records::OrderRecord,
            repository::PgOrdersRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(name = "orders.service.create_order", skip(self, order), err)]
    async fn create_order(
        &self,
        account: AccountUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError> {
        if order.items.is_empty() {
            return Err(OrdersServiceError::EmptyOrder);
        }

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_order(&mut tx, account, &order).await?;

        tx.commit().await?;

        info!(
            order = %created.uuid,
            amount = created.final_amount,
            "created order"
        );

        Ok(created)
    }

    async fn list_orders(
        &self,
        account: AccountUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.repository.list_orders(&mut tx, account).await?;

        tx.commit().await?;

        Ok(orders)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Records a completed purchase. Fails with [`OrdersServiceError::EmptyOrder`]
    /// when there are no line items, before any write happens.
    async fn create_order(
        &self,
        account: AccountUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// The account's order history, newest first.
    async fn list_orders(&self, account: AccountUuid)
    -> Result<Vec<OrderRecord>, OrdersServiceError>;
}
