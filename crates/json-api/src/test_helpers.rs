//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use plaza_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        accounts::{MockAccountsService, records::AccountUuid},
        carts::MockCartsService,
        likes::MockLikesService,
        orders::MockOrdersService,
        products::MockProductsService,
        promos::MockPromosService,
    },
    payments::MockPaymentsService,
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_ACCOUNT_UUID: AccountUuid = AccountUuid::from_uuid(Uuid::nil());

#[salvo::handler]
pub(crate) async fn inject_account(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_account_uuid(TEST_ACCOUNT_UUID);
    ctrl.call_next(req, depot, res).await;
}

/// Builds a [`State`] where every service is a fresh mock; mocks
/// without expectations reject any call.
#[derive(Default)]
pub(crate) struct StateBuilder {
    accounts: MockAccountsService,
    auth: MockAuthService,
    carts: MockCartsService,
    likes: MockLikesService,
    orders: MockOrdersService,
    payments: MockPaymentsService,
    products: MockProductsService,
    promos: MockPromosService,
}

impl StateBuilder {
    pub(crate) fn accounts(mut self, accounts: MockAccountsService) -> Self {
        self.accounts = accounts;
        self
    }

    pub(crate) fn auth(mut self, auth: MockAuthService) -> Self {
        self.auth = auth;
        self
    }

    pub(crate) fn carts(mut self, carts: MockCartsService) -> Self {
        self.carts = carts;
        self
    }

    pub(crate) fn likes(mut self, likes: MockLikesService) -> Self {
        self.likes = likes;
        self
    }

    pub(crate) fn orders(mut self, orders: MockOrdersService) -> Self {
        self.orders = orders;
        self
    }

    pub(crate) fn payments(mut self, payments: MockPaymentsService) -> Self {
        self.payments = payments;
        self
    }

    pub(crate) fn products(mut self, products: MockProductsService) -> Self {
        self.products = products;
        self
    }

    pub(crate) fn promos(mut self, promos: MockPromosService) -> Self {
        self.promos = promos;
        self
    }

    pub(crate) fn build(self) -> Arc<State> {
        Arc::new(State::new(AppContext {
            accounts: Arc::new(self.accounts),
            auth: Arc::new(self.auth),
            carts: Arc::new(self.carts),
            likes: Arc::new(self.likes),
            orders: Arc::new(self.orders),
            payments: Arc::new(self.payments),
            products: Arc::new(self.products),
            promos: Arc::new(self.promos),
        }))
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    StateBuilder::default().auth(auth).build()
}

/// A service with the state injected and a fixed account already
/// authenticated.
pub(crate) fn authed_service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_account)
            .push(route),
    )
}

/// A service with only the state injected, for public routes.
pub(crate) fn public_service(state: Arc<State>, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state)).push(route))
}
