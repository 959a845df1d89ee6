//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use plaza::catalog::ProductId;

use crate::domain::products::{
    data::{NewProduct, ProductUpdate},
    records::ProductRecord,
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const SEARCH_PRODUCTS_SQL: &str = include_str!("sql/search_products.sql");
const NEXT_PRODUCT_ID_SQL: &str = include_str!("sql/next_product_id.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(i64::from(product.get()))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn search_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        term: &str,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(SEARCH_PRODUCTS_SQL)
            .bind(format!("%{term}%"))
            .fetch_all(&mut **tx)
            .await
    }

    /// Allocates the next sequential numeric product id.
    pub(crate) async fn next_product_id(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<ProductId, sqlx::Error> {
        let next: i64 = query_scalar(NEXT_PRODUCT_ID_SQL).fetch_one(&mut **tx).await?;

        let id = u32::try_from(next).map_err(|e| sqlx::Error::ColumnDecode {
            index: "next_id".to_string(),
            source: Box::new(e),
        })?;

        Ok(ProductId::new(id))
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: ProductId,
        product: &NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(i64::from(id.get()))
            .bind(&product.name)
            .bind(&product.images)
            .bind(&product.sizes)
            .bind(&product.category)
            .bind(&product.description)
            .bind(try_amount_i64(product.new_price, "new_price")?)
            .bind(try_amount_i64(product.old_price, "old_price")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: ProductId,
        update: &ProductUpdate,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(i64::from(id.get()))
            .bind(&update.name)
            .bind(&update.images)
            .bind(&update.sizes)
            .bind(&update.category)
            .bind(&update.description)
            .bind(try_amount_i64(update.new_price, "new_price")?)
            .bind(try_amount_i64(update.old_price, "old_price")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: ProductId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(i64::from(id.get()))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let id_i64: i64 = row.try_get("id")?;

        let id = u32::try_from(id_i64).map_err(|e| sqlx::Error::ColumnDecode {
            index: "id".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            id: ProductId::new(id),
            name: row.try_get("name")?,
            images: row.try_get("images")?,
            sizes: row.try_get("sizes")?,
            category: row.try_get("category")?,
            description: row.try_get("description")?,
            new_price: try_get_amount(row, "new_price")?,
            old_price: try_get_amount(row, "old_price")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

pub(super) fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

pub(super) fn try_amount_i64(amount: u64, col: &str) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}
