//! Likes Repository

use sqlx::{Postgres, Transaction, query, query_as, query_scalar};

use plaza::catalog::ProductId;

use crate::domain::{accounts::records::AccountUuid, products::records::ProductRecord};

const PRODUCT_EXISTS_SQL: &str = include_str!("sql/product_exists.sql");
const DELETE_LIKE_SQL: &str = include_str!("sql/delete_like.sql");
const INSERT_LIKE_SQL: &str = include_str!("sql/insert_like.sql");
const COUNT_LIKES_SQL: &str = include_str!("sql/count_likes.sql");
const LIST_LIKED_PRODUCTS_SQL: &str = include_str!("sql/list_liked_products.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgLikesRepository;

impl PgLikesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn product_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<bool, sqlx::Error> {
        let found: Option<i32> = query_scalar(PRODUCT_EXISTS_SQL)
            .bind(i64::from(product.get()))
            .fetch_optional(&mut **tx)
            .await?;

        Ok(found.is_some())
    }

    /// Removes the account's like, returning the number of rows deleted.
    pub(crate) async fn delete_like(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
        account: AccountUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_LIKE_SQL)
            .bind(i64::from(product.get()))
            .bind(account.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn insert_like(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
        account: AccountUuid,
    ) -> Result<(), sqlx::Error> {
        query(INSERT_LIKE_SQL)
            .bind(i64::from(product.get()))
            .bind(account.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn count_likes(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_LIKES_SQL)
            .bind(i64::from(product.get()))
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
            index: "count".to_string(),
            source: Box::new(e),
        })
    }

    pub(crate) async fn list_liked_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_LIKED_PRODUCTS_SQL)
            .bind(account.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}
