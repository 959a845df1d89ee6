//! Promos service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use plaza::promos::{Discount, Promo, PromoCode, resolve};

use crate::{
    database::Db,
    domain::promos::{
        data::{AppliedPromo, NewPromo},
        errors::PromosServiceError,
        records::PromoRecord,
        repository::PgPromosRepository,
    },
};

/// The well-known default code seeded at process start.
pub const DEFAULT_PROMO_CODE: &str = "SAVE10";

const DEFAULT_PROMO_PERCENT: u8 = 10;

#[derive(Debug, Clone)]
pub struct PgPromosService {
    db: Db,
    repository: PgPromosRepository,
}

impl PgPromosService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgPromosRepository::new(),
        }
    }
}

#[async_trait]
impl PromosService for PgPromosService {
    #[tracing::instrument(name = "promos.service.apply_promo", skip(self), err)]
    async fn apply_promo(
        &self,
        code: &str,
        cart_subtotal: u64,
    ) -> Result<AppliedPromo, PromosServiceError> {
        let code = PromoCode::new(code);

        let mut tx = self.db.begin().await?;

        let record = self.repository.find_promo(&mut tx, &code).await?;

        tx.commit().await?;

        let promo = record.map(Promo::from);
        let discount = resolve(promo.as_ref(), cart_subtotal)?;

        // The amount is always recomputed from the submitted subtotal;
        // no previously-derived currency amount is trusted.
        let amount = discount.amount_on(cart_subtotal);

        Ok(AppliedPromo {
            shape: discount,
            percent: discount.percent(),
            discount: amount,
            new_total: cart_subtotal.saturating_sub(amount),
        })
    }

    async fn seed_default(&self) -> Result<bool, PromosServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .seed_promo(
                &mut tx,
                &NewPromo {
                    code: DEFAULT_PROMO_CODE.to_string(),
                    discount: Discount::Percent(DEFAULT_PROMO_PERCENT),
                    min_cart_value: 0,
                    active: true,
                },
            )
            .await?;

        tx.commit().await?;

        if created {
            info!(code = DEFAULT_PROMO_CODE, "seeded default promo code");
        }

        Ok(created)
    }

    async fn banner_promo(&self) -> Result<PromoRecord, PromosServiceError> {
        let code = PromoCode::new(DEFAULT_PROMO_CODE);

        let mut tx = self.db.begin().await?;

        let record = self.repository.find_promo(&mut tx, &code).await?;

        tx.commit().await?;

        record
            .filter(|promo| promo.active)
            .ok_or(PromosServiceError::NotFound)
    }

    #[tracing::instrument(name = "promos.service.create_promo", skip(self, promo), err)]
    async fn create_promo(&self, promo: NewPromo) -> Result<PromoRecord, PromosServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_promo(&mut tx, &promo).await?;

        tx.commit().await?;

        info!(code = %created.code, "created promo");

        Ok(created)
    }

    async fn set_active(&self, code: &str, active: bool) -> Result<(), PromosServiceError> {
        let code = PromoCode::new(code);

        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.set_active(&mut tx, &code, active).await?;

        if rows_affected == 0 {
            return Err(PromosServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait PromosService: Send + Sync {
    /// Validates a code against the current cart subtotal and
    /// recomputes the discount amount from it. Idempotent.
    async fn apply_promo(
        &self,
        code: &str,
        cart_subtotal: u64,
    ) -> Result<AppliedPromo, PromosServiceError>;

    /// Idempotently creates the well-known default promo. Returns
    /// `true` when the row was created on this call.
    async fn seed_default(&self) -> Result<bool, PromosServiceError>;

    /// The default code's details for the storefront banner coupon.
    async fn banner_promo(&self) -> Result<PromoRecord, PromosServiceError>;

    /// Administratively creates a promo code.
    async fn create_promo(&self, promo: NewPromo) -> Result<PromoRecord, PromosServiceError>;

    /// Flips the active flag. Deactivation is never a deletion.
    async fn set_active(&self, code: &str, active: bool) -> Result<(), PromosServiceError>;
}
