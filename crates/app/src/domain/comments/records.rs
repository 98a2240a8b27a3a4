//! Comment Records

use jiff::Timestamp;

use crate::{
    domain::{products::records::ProductUuid, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Comment UUID
pub type CommentUuid = TypedUuid<CommentRecord>;

/// Comment Record
#[derive(Debug, Clone, PartialEq)]
pub struct CommentRecord {
    pub uuid: CommentUuid,
    pub product_uuid: ProductUuid,
    pub author_uuid: UserUuid,

    /// Username of the author at read time.
    pub author: String,
    pub text: String,
    pub image: Option<String>,
    pub created_at: Timestamp,
}
