//! Shared application domain, persistence and session modules.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod payments;
pub mod session;

mod uuids;
