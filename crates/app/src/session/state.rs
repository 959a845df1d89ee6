//! Session state and its reducer.

use plaza::{carts::Cart, catalog::ProductId, promos::Discount};

/// Cached result of a successful promo application. Only the discount
/// shape is held; currency amounts are always rederived from the
/// current subtotal at use time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromoState {
    pub code: Option<String>,
    pub discount: Option<Discount>,
}

impl PromoState {
    #[must_use]
    pub fn applied(&self) -> bool {
        self.discount.is_some()
    }
}

/// The whole mutable state of one storefront session. Owned by a
/// single [`ShopSession`](crate::session::ShopSession) and advanced
/// only through [`reduce`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub logged_in: bool,
    /// The working cart: server-backed when logged in, the guest cart
    /// otherwise.
    pub cart: Cart,
    pub promo: PromoState,
}

/// A state transition. Every mutation of session state goes through
/// one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    LoggedIn { cart: Cart },
    LoggedOut,
    Increment { product: ProductId, size: String },
    Decrement { product: ProductId, size: String },
    RemoveLine { product: ProductId, size: String },
    ReplaceCart { cart: Cart },
    ClearCart,
    PromoApplied { code: String, discount: Discount },
    PromoCleared,
}

/// Pure transition function. No I/O, no side effects; persistence is
/// the caller's concern.
#[must_use]
pub fn reduce(mut state: SessionState, action: SessionAction) -> SessionState {
    match action {
        SessionAction::LoggedIn { cart } => {
            state.logged_in = true;
            state.cart = cart;
        }
        SessionAction::LoggedOut => {
            state = SessionState::default();
        }
        SessionAction::Increment { product, size } => {
            state.cart.increment(product, &size);
        }
        SessionAction::Decrement { product, size } => {
            state.cart.decrement(product, &size);
        }
        SessionAction::RemoveLine { product, size } => {
            state.cart.remove_line(product, &size);
        }
        SessionAction::ReplaceCart { cart } => {
            state.cart.replace_all(cart);
        }
        SessionAction::ClearCart => {
            state.cart.replace_all(Cart::new());
            state.promo = PromoState::default();
        }
        SessionAction::PromoApplied { code, discount } => {
            state.promo = PromoState {
                code: Some(code),
                discount: Some(discount),
            };
        }
        SessionAction::PromoCleared => {
            state.promo = PromoState::default();
        }
    }

    state
}
