//! Order Handlers

pub(crate) mod cancel;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod pay;
pub(crate) mod reset;
