//! Storefront Domain Concerns

pub mod carts;
pub mod categories;
pub mod comments;
pub mod orders;
pub mod products;
pub mod users;
