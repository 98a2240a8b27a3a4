//! Create Comment Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shopfront_app::domain::comments::{
    data::NewComment,
    records::{CommentRecord, CommentUuid},
};

use crate::{comments::errors::into_status_error, extensions::*, state::State};

/// Create Comment Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCommentRequest {
    pub text: String,

    /// Storage path of an attached image
    pub image: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CommentResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub author_uuid: Uuid,

    /// Username of the author
    pub author: String,
    pub text: String,
    pub image: Option<String>,
    pub created_at: String,
}

impl From<CommentRecord> for CommentResponse {
    fn from(comment: CommentRecord) -> Self {
        Self {
            uuid: comment.uuid.into(),
            product_uuid: comment.product_uuid.into(),
            author_uuid: comment.author_uuid.into(),
            author: comment.author,
            text: comment.text,
            image: comment.image,
            created_at: comment.created_at.to_string(),
        }
    }
}

/// Create Comment Handler
///
/// Posts a comment on a product as the authenticated user.
#[endpoint(
    tags("comments"),
    summary = "Create Comment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Comment created"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<CreateCommentRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CommentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let request = json.into_inner();

    let comment = NewComment {
        uuid: CommentUuid::new(),
        product_uuid: product.into_inner().into(),
        text: request.text,
        image: request.image,
    };

    let comment = state
        .app
        .comments
        .create_comment(user, comment)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(comment.into()))
}
