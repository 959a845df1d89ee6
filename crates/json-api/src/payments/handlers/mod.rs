//! Payment Handlers

pub(crate) mod create;
