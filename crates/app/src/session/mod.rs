//! Storefront session.
//!
//! One `ShopSession` exists per connected storefront. Local state is an
//! explicit [`SessionState`] value advanced by a pure reducer, durable
//! cart writes go through a strictly ordered [`CartSyncQueue`], and the
//! guest cart plus merge guard live behind a [`SessionStore`].

mod queue;
mod shop;
mod state;
mod store;

pub use queue::*;
pub use shop::*;
pub use state::*;
pub use store::*;
