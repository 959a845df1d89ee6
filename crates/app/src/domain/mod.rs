//! Plaza Domain Concerns

pub mod accounts;
pub mod carts;
pub mod likes;
pub mod orders;
pub mod products;
pub mod promos;
