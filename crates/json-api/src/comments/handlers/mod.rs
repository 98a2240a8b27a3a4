//! Comment Handlers

pub(crate) mod create;
