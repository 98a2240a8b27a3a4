//! Category Data

use validator::Validate;

use crate::{domain::categories::records::CategoryUuid, slugs::validate_slug};

/// New Category Data
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewCategory {
    pub uuid: CategoryUuid,

    #[validate(length(min = 1, max = 50))]
    pub name: String,

    #[validate(custom = "validate_slug")]
    pub slug: String,
}
