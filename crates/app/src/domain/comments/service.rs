//! Comments service.

use async_trait::async_trait;
use mockall::automock;
use validator::Validate;

use crate::{
    database::Db,
    domain::{
        comments::{
            data::NewComment, errors::CommentsServiceError, records::CommentRecord,
            repository::PgCommentsRepository,
        },
        products::records::ProductUuid,
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCommentsService {
    db: Db,
    repository: PgCommentsRepository,
}

impl PgCommentsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCommentsRepository::new(),
        }
    }
}

#[async_trait]
impl CommentsService for PgCommentsService {
    async fn list_comments(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<CommentRecord>, CommentsServiceError> {
        let mut tx = self.db.begin().await?;

        let comments = self.repository.list_comments(&mut tx, product).await?;

        tx.commit().await?;

        Ok(comments)
    }

    #[tracing::instrument(
        name = "comments.service.create_comment",
        skip(self, comment),
        fields(product_uuid = %comment.product_uuid),
        err
    )]
    async fn create_comment(
        &self,
        author: UserUuid,
        comment: NewComment,
    ) -> Result<CommentRecord, CommentsServiceError> {
        comment.validate()?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_comment(&mut tx, author, comment)
            .await?;

        tx.commit().await?;

        tracing::info!(comment_uuid = %created.uuid, author_uuid = %author, "created comment");

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait CommentsService: Send + Sync {
    /// Comments on a product, oldest first.
    async fn list_comments(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<CommentRecord>, CommentsServiceError>;

    /// Posts a comment as `author`.
    async fn create_comment(
        &self,
        author: UserUuid,
        comment: NewComment,
    ) -> Result<CommentRecord, CommentsServiceError>;
}
