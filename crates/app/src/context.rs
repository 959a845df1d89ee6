//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        accounts::{AccountsService, PgAccountsService},
        carts::{CartsService, PgCartsService},
        likes::{LikesService, PgLikesService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        promos::{PgPromosService, PromosService},
    },
    payments::{HttpPaymentsClient, PaymentsConfig, PaymentsService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub accounts: Arc<dyn AccountsService>,
    pub auth: Arc<dyn AuthService>,
    pub carts: Arc<dyn CartsService>,
    pub likes: Arc<dyn LikesService>,
    pub orders: Arc<dyn OrdersService>,
    pub payments: Arc<dyn PaymentsService>,
    pub products: Arc<dyn ProductsService>,
    pub promos: Arc<dyn PromosService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        payments: PaymentsConfig,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool);

        Ok(Self {
            accounts: Arc::new(PgAccountsService::new(db.clone())),
            auth: Arc::new(PgAuthService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            likes: Arc::new(PgLikesService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            payments: Arc::new(HttpPaymentsClient::new(payments)),
            products: Arc::new(PgProductsService::new(db.clone())),
            promos: Arc::new(PgPromosService::new(db)),
        })
    }
}
