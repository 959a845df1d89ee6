//! The storefront session facade.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use plaza::{
    carts::Cart,
    catalog::{Catalog, ProductId},
    pricing::{PricedSelection, SelectionKey, cart_subtotal, price_selection},
};

use crate::{
    domain::{
        accounts::records::AccountUuid,
        carts::{CartsService, CartsServiceError},
        promos::{PromosService, PromosServiceError, data::AppliedPromo},
    },
    session::{
        CartSyncQueue, RetryPolicy, SessionAction, SessionState, SessionStore, reduce,
    },
};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Carts(#[from] CartsServiceError),

    #[error(transparent)]
    Promos(#[from] PromosServiceError),
}

/// One storefront session: a guest browsing, or an account signed in.
///
/// Cart mutations apply to local state immediately and persistence
/// happens afterwards: synchronously into the [`SessionStore`] for a
/// guest, through the ordered [`CartSyncQueue`] for a signed-in
/// account. The UI never waits on a durable write.
pub struct ShopSession {
    state: SessionState,
    store: Arc<dyn SessionStore>,
    carts: Arc<dyn CartsService>,
    promos: Arc<dyn PromosService>,
    account: Option<AccountUuid>,
    queue: Option<CartSyncQueue>,
    retry_policy: RetryPolicy,
    /// In-memory latch over the durable merge flag, so the flag is
    /// only consulted once per login.
    merged_this_login: bool,
}

impl ShopSession {
    /// Starts a guest session, picking up any guest cart the store
    /// already holds.
    #[must_use]
    pub fn new(
        store: Arc<dyn SessionStore>,
        carts: Arc<dyn CartsService>,
        promos: Arc<dyn PromosService>,
    ) -> Self {
        let mut state = SessionState::default();
        state.cart = store.guest_cart();

        Self {
            state,
            store,
            carts,
            promos,
            account: None,
            queue: None,
            retry_policy: RetryPolicy::default(),
            merged_this_login: false,
        }
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.state.cart
    }

    /// Signs the account in: fetches the server cart, merges the guest
    /// cart into it at most once per login, and starts the write
    /// queue.
    pub async fn login(&mut self, account: AccountUuid) -> Result<(), SessionError> {
        let mut server_cart = self.carts.get_cart(account).await?;

        if !self.merged_this_login && !self.store.has_merged() {
            let guest_cart = self.store.guest_cart();

            if !guest_cart.is_empty() {
                server_cart.merge_from(&guest_cart);
                self.carts.put_cart(account, server_cart.clone()).await?;
                self.store.clear_guest_cart();

                info!(units = server_cart.total_units(), "merged guest cart");
            }

            self.store.set_merged(true);
            self.merged_this_login = true;
        }

        self.account = Some(account);
        self.queue = Some(CartSyncQueue::spawn(
            Arc::clone(&self.carts),
            account,
            self.retry_policy,
            64,
        ));

        self.state = reduce(
            std::mem::take(&mut self.state),
            SessionAction::LoggedIn { cart: server_cart },
        );

        Ok(())
    }

    /// Signs out. Queued writes are drained first; local state resets
    /// to whatever guest cart the store holds.
    pub async fn logout(&mut self) {
        if let Some(queue) = self.queue.take() {
            queue.shutdown().await;
        }

        self.account = None;
        self.merged_this_login = false;
        self.store.set_merged(false);

        self.state = reduce(std::mem::take(&mut self.state), SessionAction::LoggedOut);
        self.state.cart = self.store.guest_cart();
    }

    pub async fn add_item(&mut self, product: ProductId, size: &str) {
        self.apply(SessionAction::Increment {
            product,
            size: size.to_string(),
        })
        .await;
    }

    pub async fn remove_item(&mut self, product: ProductId, size: &str) {
        self.apply(SessionAction::Decrement {
            product,
            size: size.to_string(),
        })
        .await;
    }

    pub async fn remove_line(&mut self, product: ProductId, size: &str) {
        self.apply(SessionAction::RemoveLine {
            product,
            size: size.to_string(),
        })
        .await;
    }

    /// Empties the cart and drops the applied promo, as after a
    /// completed checkout.
    pub async fn clear_cart(&mut self) {
        self.apply(SessionAction::ClearCart).await;
    }

    /// Validates a promo code against the current full-cart subtotal.
    /// On success only the discount shape is cached; amounts are
    /// rederived from the live subtotal at checkout.
    pub async fn apply_promo(
        &mut self,
        code: &str,
        catalog: &Catalog,
    ) -> Result<AppliedPromo, SessionError> {
        let subtotal = cart_subtotal(&self.state.cart, catalog);

        let applied = self.promos.apply_promo(code, subtotal).await?;

        self.state = reduce(
            std::mem::take(&mut self.state),
            SessionAction::PromoApplied {
                code: code.to_string(),
                discount: applied.shape,
            },
        );

        Ok(applied)
    }

    /// Prices the checked-off selection with the cached promo shape.
    #[must_use]
    pub fn checkout_totals(
        &self,
        selection: &[SelectionKey],
        catalog: &Catalog,
    ) -> PricedSelection {
        price_selection(&self.state.cart, selection, catalog, self.state.promo.discount)
    }

    /// Full-cart subtotal for the cart page, over all lines.
    #[must_use]
    pub fn cart_page_subtotal(&self, catalog: &Catalog) -> u64 {
        cart_subtotal(&self.state.cart, catalog)
    }

    async fn apply(&mut self, action: SessionAction) {
        self.state = reduce(std::mem::take(&mut self.state), action);

        if let Some(queue) = &self.queue {
            queue.enqueue(self.state.cart.clone()).await;
        } else {
            self.store.save_guest_cart(&self.state.cart);
        }
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use testresult::TestResult;

    use plaza::{catalog::Product, promos::Discount};

    use crate::{
        domain::{carts::MockCartsService, promos::MockPromosService},
        session::MemoryStore,
    };

    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_products(vec![Product {
            id: ProductId::new(101),
            name: "Peplum Blouse".to_string(),
            images: vec![],
            sizes: ["S", "M", "L"].into_iter().map(String::from).collect(),
            category: "women".to_string(),
            new_price: 2000,
            old_price: 2500,
        }])
    }

    fn session_with(
        carts: MockCartsService,
        promos: MockPromosService,
    ) -> (ShopSession, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let session = ShopSession::new(
            Arc::clone(&store) as Arc<dyn SessionStore>,
            Arc::new(carts),
            Arc::new(promos),
        );

        (session, store)
    }

    #[tokio::test]
    async fn guest_mutations_persist_to_the_store() -> TestResult {
        let (mut session, store) = session_with(MockCartsService::new(), MockPromosService::new());

        session.add_item(ProductId::new(101), "M").await;
        session.add_item(ProductId::new(101), "M").await;
        session.remove_item(ProductId::new(101), "M").await;

        assert_eq!(store.guest_cart().quantity(ProductId::new(101), "M"), 1);

        Ok(())
    }

    #[tokio::test]
    async fn login_merges_guest_cart_by_summing() -> TestResult {
        let account = AccountUuid::new();

        let mut server_cart = Cart::new();
        server_cart.increment(ProductId::new(101), "M");

        let mut merged = server_cart.clone();
        merged.increment(ProductId::new(101), "M");

        let mut carts = MockCartsService::new();
        carts
            .expect_get_cart()
            .with(eq(account))
            .times(1)
            .return_once(move |_| Ok(server_cart));
        carts
            .expect_put_cart()
            .with(eq(account), eq(merged))
            .times(1)
            .returning(|_, _| Ok(()));

        let (mut session, store) = session_with_carts(carts);

        session.add_item(ProductId::new(101), "M").await;
        session.login(account).await?;

        assert_eq!(session.cart().quantity(ProductId::new(101), "M"), 2);
        assert!(store.guest_cart().is_empty());
        assert!(store.has_merged());

        session.logout().await;

        Ok(())
    }

    #[tokio::test]
    async fn merge_runs_at_most_once_per_login() -> TestResult {
        let account = AccountUuid::new();

        let mut carts = MockCartsService::new();

        // Two logins, but the durable flag from the first one makes
        // the second skip the merge write entirely.
        carts.expect_get_cart().times(2).returning(|_| Ok(Cart::new()));
        carts.expect_put_cart().times(1).returning(|_, _| Ok(()));

        let (mut session, store) = session_with_carts(carts);

        session.add_item(ProductId::new(101), "M").await;
        session.login(account).await?;

        // A re-render style double invocation with the flag still set.
        store.set_merged(true);
        session.merged_this_login = false;
        session.store.save_guest_cart(&session.state.cart);
        session.login(account).await?;

        session.logout().await;

        Ok(())
    }

    #[tokio::test]
    async fn apply_promo_caches_the_shape_and_prices_checkout() -> TestResult {
        let mut promos = MockPromosService::new();
        promos
            .expect_apply_promo()
            .with(eq("SAVE10"), eq(4000_u64))
            .times(1)
            .returning(|_, subtotal| {
                Ok(AppliedPromo {
                    shape: Discount::Percent(10),
                    percent: 10,
                    discount: subtotal / 10,
                    new_total: subtotal - subtotal / 10,
                })
            });

        let (mut session, _store) = session_with(MockCartsService::new(), promos);

        session.add_item(ProductId::new(101), "M").await;
        session.add_item(ProductId::new(101), "M").await;

        let applied = session.apply_promo("SAVE10", &catalog()).await?;

        assert_eq!(applied.percent, 10);

        let selection = vec![SelectionKey::new(ProductId::new(101), "M")];
        let priced = session.checkout_totals(&selection, &catalog());

        assert_eq!(priced.subtotal, 4000);
        assert_eq!(priced.discount, 400);
        assert_eq!(priced.total, 3600);

        Ok(())
    }

    #[tokio::test]
    async fn fixed_promos_price_checkout_with_the_fixed_amount() -> TestResult {
        let mut promos = MockPromosService::new();
        promos
            .expect_apply_promo()
            .with(eq("FLAT500"), eq(4000_u64))
            .times(1)
            .returning(|_, subtotal| {
                Ok(AppliedPromo {
                    shape: Discount::Fixed(500),
                    percent: 0,
                    discount: 500,
                    new_total: subtotal - 500,
                })
            });

        let (mut session, _store) = session_with(MockCartsService::new(), promos);

        session.add_item(ProductId::new(101), "M").await;
        session.add_item(ProductId::new(101), "M").await;

        session.apply_promo("FLAT500", &catalog()).await?;

        let selection = vec![SelectionKey::new(ProductId::new(101), "M")];
        let priced = session.checkout_totals(&selection, &catalog());

        assert_eq!(priced.subtotal, 4000);
        assert_eq!(priced.discount, 500);
        assert_eq!(priced.total, 3500);

        Ok(())
    }

    fn session_with_carts(carts: MockCartsService) -> (ShopSession, Arc<MemoryStore>) {
        session_with(carts, MockPromosService::new())
    }
}
