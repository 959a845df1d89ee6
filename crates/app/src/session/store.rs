//! Durable device-local session storage.

use std::sync::{Mutex, PoisonError};

use plaza::carts::Cart;

/// Device-local durable storage for the pieces of session state that
/// must survive a reload: the guest cart and the once-per-login merge
/// guard. The guard is durable on purpose, an in-memory flag alone
/// would re-trigger the merge after a reload and double quantities.
pub trait SessionStore: Send + Sync {
    fn guest_cart(&self) -> Cart;

    fn save_guest_cart(&self, cart: &Cart);

    fn clear_guest_cart(&self);

    /// Whether the guest cart has already been merged for the current
    /// login.
    fn has_merged(&self) -> bool;

    fn set_merged(&self, merged: bool);
}

/// In-memory [`SessionStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryStoreInner>,
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    guest_cart: Cart,
    merged: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn guest_cart(&self) -> Cart {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .guest_cart
            .clone()
    }

    fn save_guest_cart(&self, cart: &Cart) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .guest_cart = cart.clone();
    }

    fn clear_guest_cart(&self) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .guest_cart = Cart::new();
    }

    fn has_merged(&self) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .merged
    }

    fn set_merged(&self, merged: bool) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .merged = merged;
    }
}

#[cfg(test)]
mod tests {
    use plaza::catalog::ProductId;

    use super::*;

    #[test]
    fn guest_cart_round_trips() {
        let store = MemoryStore::new();

        let mut cart = Cart::new();
        cart.increment(ProductId::new(101), "M");

        store.save_guest_cart(&cart);

        assert_eq!(store.guest_cart(), cart);

        store.clear_guest_cart();

        assert!(store.guest_cart().is_empty());
    }

    #[test]
    fn merge_flag_defaults_to_false() {
        let store = MemoryStore::new();

        assert!(!store.has_merged());

        store.set_merged(true);

        assert!(store.has_merged());
    }
}
