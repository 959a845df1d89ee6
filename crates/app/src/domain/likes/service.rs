//! Likes service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use plaza::catalog::ProductId;

use crate::{
    database::Db,
    domain::{
        accounts::records::AccountUuid,
        likes::{data::LikeStatus, errors::LikesServiceError, repository::PgLikesRepository},
        products::records::ProductRecord,
    },
};

#[derive(Debug, Clone)]
pub struct PgLikesService {
    db: Db,
    repository: PgLikesRepository,
}

impl PgLikesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgLikesRepository::new(),
        }
    }
}

#[async_trait]
impl LikesService for PgLikesService {
    #[tracing::instrument(name = "likes.service.toggle_like", skip(self), err)]
    async fn toggle_like(
        &self,
        account: AccountUuid,
        product: ProductId,
    ) -> Result<LikeStatus, LikesServiceError> {
        let mut tx = self.db.begin().await?;

        if !self.repository.product_exists(&mut tx, product).await? {
            return Err(LikesServiceError::NotFound);
        }

        let removed = self.repository.delete_like(&mut tx, product, account).await?;

        let liked = removed == 0;
        if liked {
            self.repository.insert_like(&mut tx, product, account).await?;
        }

        let likes_count = self.repository.count_likes(&mut tx, product).await?;

        tx.commit().await?;

        info!(product_id = %product, liked, "toggled like");

        Ok(LikeStatus { liked, likes_count })
    }

    async fn list_liked_products(
        &self,
        account: AccountUuid,
    ) -> Result<Vec<ProductRecord>, LikesServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_liked_products(&mut tx, account).await?;

        tx.commit().await?;

        Ok(products)
    }
}

#[automock]
#[async_trait]
pub trait LikesService: Send + Sync {
    /// Flips the account's like on a product, returning the resulting
    /// state and total like count.
    async fn toggle_like(
        &self,
        account: AccountUuid,
        product: ProductId,
    ) -> Result<LikeStatus, LikesServiceError>;

    /// Retrieves the products the account likes, most recently liked
    /// first.
    async fn list_liked_products(
        &self,
        account: AccountUuid,
    ) -> Result<Vec<ProductRecord>, LikesServiceError>;
}
