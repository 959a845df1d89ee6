//! Product likes.

pub mod data;
pub mod errors;
mod repository;
pub mod service;

pub use errors::LikesServiceError;
pub use service::*;
