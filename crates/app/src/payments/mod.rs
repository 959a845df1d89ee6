//! Payments

mod client;
mod decline;
mod errors;

pub use client::*;
pub use decline::decline_message;
pub use errors::*;
