//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;
use uuid::Uuid;

use crate::{
    auth::{
        ApiTokenVersion, AuthServiceError, IssuedApiToken, NewApiToken, digest_matches,
        format_api_token, generate_api_token_secret, parse_api_token,
        repository::PgAuthRepository, secret_digest,
    },
    database::Db,
    domain::accounts::records::AccountUuid,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAuthRepository::new(),
        }
    }

    /// Issues a new API token for the given account. The raw token is
    /// returned exactly once; only its digest is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insertion fails.
    pub async fn issue_api_token(
        &self,
        account: AccountUuid,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let token_uuid = Uuid::now_v7();
        let version = ApiTokenVersion::V1;
        let secret = generate_api_token_secret();
        let token = format_api_token(token_uuid, version, &secret);
        let token_hash = secret_digest(&token_uuid, version, &secret);

        let mut tx = self.db.begin().await?;

        self.repository
            .create_api_token(
                &mut tx,
                &NewApiToken {
                    uuid: token_uuid,
                    account_uuid: account,
                    version,
                    token_hash,
                    expires_at,
                },
            )
            .await?;

        tx.commit().await?;

        info!(account = %account, token = %token_uuid, "issued api token");

        Ok(IssuedApiToken {
            token,
            uuid: token_uuid,
            account_uuid: account,
            expires_at,
        })
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AccountUuid, AuthServiceError> {
        let parsed = parse_api_token(bearer_token)?;

        let mut tx = self.db.begin().await?;

        let token = self
            .repository
            .find_api_token(&mut tx, parsed.token_uuid)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        tx.commit().await?;

        if token.version != parsed.version {
            return Err(AuthServiceError::NotFound);
        }

        let digest = secret_digest(&parsed.token_uuid, parsed.version, &parsed.secret);

        // Digest mismatch is indistinguishable from absence on purpose.
        if !digest_matches(&digest, &token.token_hash) {
            return Err(AuthServiceError::NotFound);
        }

        if let Some(expires_at) = token.expires_at
            && expires_at <= Timestamp::now()
        {
            return Err(AuthServiceError::Expired);
        }

        Ok(token.account_uuid)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolves a raw bearer token to the owning account.
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AccountUuid, AuthServiceError>;
}
