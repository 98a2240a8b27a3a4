//! Comment Data

use validator::{Validate, ValidationError};

use crate::domain::{comments::records::CommentUuid, products::records::ProductUuid};

/// New Comment Data
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewComment {
    pub uuid: CommentUuid,
    pub product_uuid: ProductUuid,

    #[validate(custom = "validate_not_blank")]
    pub text: String,
    pub image: Option<String>,
}

fn validate_not_blank(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("comment text must not be empty".into());

        return Err(error);
    }

    Ok(())
}
