//! Promos Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use plaza::promos::{Discount, PromoCode};

use crate::domain::promos::{data::NewPromo, records::PromoRecord, records::PromoUuid};

const FIND_PROMO_SQL: &str = include_str!("sql/find_promo.sql");
const CREATE_PROMO_SQL: &str = include_str!("sql/create_promo.sql");
const SEED_PROMO_SQL: &str = include_str!("sql/seed_promo.sql");
const SET_ACTIVE_SQL: &str = include_str!("sql/set_active.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPromosRepository;

impl PgPromosRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Looks up a promo by its canonical upper-cased code, active or
    /// not. Activity filtering is the resolver's concern so that
    /// inactive and absent codes surface identically to callers.
    pub(crate) async fn find_promo(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &PromoCode,
    ) -> Result<Option<PromoRecord>, sqlx::Error> {
        query_as::<Postgres, PromoRecord>(FIND_PROMO_SQL)
            .bind(code.as_str())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_promo(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promo: &NewPromo,
    ) -> Result<PromoRecord, sqlx::Error> {
        let code = PromoCode::new(&promo.code);
        let (discount_type, amount) = encode_discount(promo.discount)?;

        query_as::<Postgres, PromoRecord>(CREATE_PROMO_SQL)
            .bind(PromoUuid::new().into_uuid())
            .bind(code.as_str())
            .bind(discount_type)
            .bind(amount)
            .bind(try_amount_i64(promo.min_cart_value)?)
            .bind(promo.active)
            .fetch_one(&mut **tx)
            .await
    }

    /// Inserts the promo only when the code is not yet present.
    /// Returns `true` when a row was created.
    pub(crate) async fn seed_promo(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promo: &NewPromo,
    ) -> Result<bool, sqlx::Error> {
        let code = PromoCode::new(&promo.code);
        let (discount_type, amount) = encode_discount(promo.discount)?;

        let rows_affected = query(SEED_PROMO_SQL)
            .bind(PromoUuid::new().into_uuid())
            .bind(code.as_str())
            .bind(discount_type)
            .bind(amount)
            .bind(try_amount_i64(promo.min_cart_value)?)
            .bind(promo.active)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }

    pub(crate) async fn set_active(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &PromoCode,
        active: bool,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SET_ACTIVE_SQL)
            .bind(code.as_str())
            .bind(active)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for PromoRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let code: String = row.try_get("code")?;
        let discount_type: String = row.try_get("discount_type")?;
        let amount = try_get_amount(row, "amount")?;

        let discount = match discount_type.as_str() {
            "percent" => {
                let percent = u8::try_from(amount).map_err(|e| sqlx::Error::ColumnDecode {
                    index: "amount".to_string(),
                    source: Box::new(e),
                })?;

                Discount::Percent(percent)
            }
            "fixed" => Discount::Fixed(amount),
            other => {
                return Err(sqlx::Error::ColumnDecode {
                    index: "discount_type".to_string(),
                    source: format!("unknown discount type {other:?}").into(),
                });
            }
        };

        Ok(Self {
            uuid: PromoUuid::from_uuid(row.try_get("uuid")?),
            code: PromoCode::new(&code),
            discount,
            min_cart_value: try_get_amount(row, "min_cart_value")?,
            active: row.try_get("active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

fn encode_discount(discount: Discount) -> Result<(&'static str, i64), sqlx::Error> {
    match discount {
        Discount::Percent(percent) => Ok(("percent", i64::from(percent))),
        Discount::Fixed(amount) => Ok(("fixed", try_amount_i64(amount)?)),
    }
}

fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

fn try_amount_i64(amount: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|e| sqlx::Error::ColumnDecode {
        index: "amount".to_string(),
        source: Box::new(e),
    })
}
