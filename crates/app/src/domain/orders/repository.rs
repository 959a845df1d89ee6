//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, Row, Transaction,
    postgres::PgRow,
    query_as,
    types::Json,
};

use crate::{
    domain::{
        accounts::records::AccountUuid,
        orders::{
            data::NewOrder,
            records::{OrderLine, OrderRecord, OrderStatus, OrderUuid},
        },
    },
    uuids::TypedUuid,
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
        order: &NewOrder,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(OrderUuid::new().into_uuid())
            .bind(account.into_uuid())
            .bind(Json(&order.items))
            .bind(try_amount_i64(order.subtotal, "subtotal")?)
            .bind(try_amount_i64(order.discount, "discount")?)
            .bind(i16::from(order.discount_percent))
            .bind(try_amount_i64(order.final_amount, "final_amount")?)
            .bind(OrderStatus::Paid.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    /// Lists the account's orders, newest first.
    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(account.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let Json(items): Json<Vec<OrderLine>> = row.try_get("items")?;

        let status = match row.try_get::<&str, _>("status")? {
            "pending" => OrderStatus::Pending,
            "paid" => OrderStatus::Paid,
            other => {
                return Err(sqlx::Error::ColumnDecode {
                    index: "status".to_string(),
                    source: format!("unknown order status {other:?}").into(),
                });
            }
        };

        Ok(Self {
            uuid: TypedUuid::from_uuid(row.try_get("uuid")?),
            account_uuid: TypedUuid::from_uuid(row.try_get("account_uuid")?),
            items,
            subtotal: try_get_amount(row, "subtotal")?,
            discount: try_get_amount(row, "discount")?,
            discount_percent: try_get_percent(row, "discount_percent")?,
            final_amount: try_get_amount(row, "final_amount")?,
            status,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

fn try_get_percent(row: &PgRow, col: &str) -> Result<u8, sqlx::Error> {
    let percent_i16: i16 = row.try_get(col)?;

    u8::try_from(percent_i16).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

fn try_amount_i64(amount: u64, col: &str) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}
