//! Auth repository.

use jiff_sqlx::{Timestamp as SqlxTimestamp, ToSqlx};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    auth::{ApiTokenVersion, models::ActiveApiToken, models::NewApiToken},
    uuids::TypedUuid,
};

const FIND_API_TOKEN_SQL: &str = include_str!("sql/find_api_token.sql");
const CREATE_API_TOKEN_SQL: &str = include_str!("sql/create_api_token.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAuthRepository;

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_api_token(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        token_uuid: Uuid,
    ) -> Result<Option<ActiveApiToken>, sqlx::Error> {
        query_as::<Postgres, ActiveApiToken>(FIND_API_TOKEN_SQL)
            .bind(token_uuid)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_api_token(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        token: &NewApiToken,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_API_TOKEN_SQL)
            .bind(token.uuid)
            .bind(token.account_uuid.into_uuid())
            .bind(token.version.as_i16())
            .bind(&token.token_hash)
            .bind(token.expires_at.map(|t| t.to_sqlx()))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for ActiveApiToken {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let version = ApiTokenVersion::try_from(row.try_get::<i16, _>("version")?).map_err(|e| {
            sqlx::Error::ColumnDecode {
                index: "version".to_string(),
                source: Box::new(e),
            }
        })?;

        Ok(Self {
            account_uuid: TypedUuid::from_uuid(row.try_get("account_uuid")?),
            version,
            token_hash: row.try_get("token_hash")?,
            expires_at: row
                .try_get::<Option<SqlxTimestamp>, _>("expires_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
