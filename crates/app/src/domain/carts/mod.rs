//! Carts

pub mod errors;
mod repository;
pub mod service;

pub use errors::CartsServiceError;
pub use service::*;
