//! Product Records

use jiff::Timestamp;
use smallvec::SmallVec;

use crate::{domain::categories::records::CategoryRecord, uuids::TypedUuid};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Categories attached to a product.
pub type ProductCategories = SmallVec<[CategoryRecord; 2]>;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub slug: String,

    /// Price in minor units.
    pub price: u64,
    pub description: Option<String>,

    /// Storage path of the product image, if any.
    pub image: Option<String>,
    pub is_active: bool,
    pub categories: ProductCategories,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProductRecord {
    /// Names of the attached categories.
    #[must_use]
    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }
}
