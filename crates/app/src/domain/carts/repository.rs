//! Carts Repository
//!
//! The server cart is a single JSONB document per account, always
//! replaced whole. There is no partial-update path, which is why
//! callers send the full recomputed cart on every mutation.

use sqlx::{Postgres, Transaction, query, query_scalar, types::Json};

use plaza::carts::Cart;

use crate::domain::accounts::records::AccountUuid;

const GET_CART_SQL: &str = include_str!("sql/get_cart.sql");
const UPSERT_CART_SQL: &str = include_str!("sql/upsert_cart.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Fetches the cart document, `None` when the account has never
    /// written one.
    pub(crate) async fn get_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
    ) -> Result<Option<Cart>, sqlx::Error> {
        let data: Option<Json<Cart>> = query_scalar(GET_CART_SQL)
            .bind(account.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(data.map(|Json(cart)| cart))
    }

    /// Overwrites the entire cart document.
    pub(crate) async fn upsert_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
        cart: &Cart,
    ) -> Result<(), sqlx::Error> {
        query(UPSERT_CART_SQL)
            .bind(account.into_uuid())
            .bind(Json(cart))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}
