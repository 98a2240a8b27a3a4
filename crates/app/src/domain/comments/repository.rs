//! Comments Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    comments::{
        data::NewComment,
        records::{CommentRecord, CommentUuid},
    },
    products::records::ProductUuid,
    users::records::UserUuid,
};

const LIST_COMMENTS_SQL: &str = include_str!("sql/list_comments.sql");
const CREATE_COMMENT_SQL: &str = include_str!("sql/create_comment.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCommentsRepository;

impl PgCommentsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_comments(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Vec<CommentRecord>, sqlx::Error> {
        query_as::<Postgres, CommentRecord>(LIST_COMMENTS_SQL)
            .bind(product.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_comment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        author: UserUuid,
        comment: NewComment,
    ) -> Result<CommentRecord, sqlx::Error> {
        query_as::<Postgres, CommentRecord>(CREATE_COMMENT_SQL)
            .bind(comment.uuid.into_uuid())
            .bind(comment.product_uuid.into_uuid())
            .bind(author.into_uuid())
            .bind(comment.text)
            .bind(comment.image)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CommentRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CommentUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            author_uuid: UserUuid::from_uuid(row.try_get("author_uuid")?),
            author: row.try_get("author")?,
            text: row.try_get("text")?,
            image: row.try_get("image")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
