//! Products Data

use validator::Validate;

use crate::{
    domain::{categories::records::CategoryUuid, products::records::ProductUuid},
    slugs::validate_slug,
};

/// New Product Data
///
/// A blank `slug` is derived from `name` on creation.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewProduct {
    pub uuid: ProductUuid,

    #[validate(length(min = 1, max = 50))]
    pub name: String,

    /// Price in minor units.
    pub price: u64,
    pub description: Option<String>,

    #[validate(custom = "validate_slug")]
    pub slug: Option<String>,
    pub image: Option<String>,
    pub is_active: bool,

    #[validate(length(min = 1))]
    pub categories: Vec<CategoryUuid>,
}

/// Listing order by creation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductOrder {
    #[default]
    Newest,
    Oldest,
}

/// Product listing filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductsQuery {
    /// Only products in the category with this slug.
    pub category: Option<String>,

    pub order: ProductOrder,

    /// Only products whose active flag matches.
    pub active: Option<bool>,
}
