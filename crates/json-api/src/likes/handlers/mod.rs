//! Like Handlers

pub(crate) mod index;
pub(crate) mod toggle;
