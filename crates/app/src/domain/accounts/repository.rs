//! Accounts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    domain::accounts::{
        data::NewAccount,
        records::{AccountRecord, AccountUuid},
    },
    uuids::TypedUuid,
};

const GET_ACCOUNT_SQL: &str = include_str!("sql/get_account.sql");
const CREATE_ACCOUNT_SQL: &str = include_str!("sql/create_account.sql");
const DELETE_ACCOUNT_ORDERS_SQL: &str = include_str!("sql/delete_account_orders.sql");
const DELETE_ACCOUNT_CART_SQL: &str = include_str!("sql/delete_account_cart.sql");
const DELETE_ACCOUNT_SQL: &str = include_str!("sql/delete_account.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAccountsRepository;

impl PgAccountsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_account(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
    ) -> Result<AccountRecord, sqlx::Error> {
        query_as::<Postgres, AccountRecord>(GET_ACCOUNT_SQL)
            .bind(account.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_account(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: &NewAccount,
    ) -> Result<AccountRecord, sqlx::Error> {
        query_as::<Postgres, AccountRecord>(CREATE_ACCOUNT_SQL)
            .bind(AccountUuid::new().into_uuid())
            .bind(&account.name)
            .bind(&account.email)
            .bind(&account.phone)
            .bind(&account.country)
            .bind(&account.region)
            .bind(&account.postal_code)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_account_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ACCOUNT_ORDERS_SQL)
            .bind(account.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_account_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ACCOUNT_CART_SQL)
            .bind(account.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_account(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ACCOUNT_SQL)
            .bind(account.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for AccountRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: TypedUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            country: row.try_get("country")?,
            region: row.try_get("region")?,
            postal_code: row.try_get("postal_code")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
