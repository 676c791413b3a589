//! PostgreSQL comment repository implementation

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::comment::{Comment, CommentRepository, CommentWithRelations};
use crate::domain::photo::PhotoSummary;
use crate::domain::{CommentId, DomainError, PhotoId, UserId};
use crate::infrastructure::storage::{
    live, map_sqlx_error, read_error, row_to_owner, soft_delete_sql, OWNER_COLUMNS,
};

const COMMENT_COLUMNS: &str = "c.id, c.message, c.photo_id, c.user_id, c.created_at, c.updated_at";

/// Commented photo, aliased so it cannot clash with the comment's own columns
const PHOTO_RELATION_COLUMNS: &str = "p.id AS rel_photo_id, p.title AS rel_title, \
     p.caption AS rel_caption, p.url AS rel_url, p.user_id AS rel_user_id";

/// PostgreSQL implementation of CommentRepository
#[derive(Debug, Clone)]
pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn insert_sql() -> String {
    format!(
        r#"
        INSERT INTO comments AS c (message, photo_id, user_id, created_at, updated_at)
        VALUES ($1, $2, $3, NOW(), NOW())
        RETURNING {}
        "#,
        COMMENT_COLUMNS
    )
}

fn select_by_id_sql() -> String {
    format!(
        "SELECT {} FROM comments c WHERE c.id = $1 AND {}",
        COMMENT_COLUMNS,
        live("c")
    )
}

fn list_by_photo_sql() -> String {
    format!(
        r#"
        SELECT {}, {}, {}
        FROM comments c
        LEFT JOIN users u ON u.id = c.user_id AND {}
        LEFT JOIN photos p ON p.id = c.photo_id AND {}
        WHERE c.photo_id = $1 AND {}
        ORDER BY c.id
        "#,
        COMMENT_COLUMNS,
        OWNER_COLUMNS,
        PHOTO_RELATION_COLUMNS,
        live("u"),
        live("p"),
        live("c")
    )
}

fn update_sql() -> String {
    format!(
        r#"
        UPDATE comments AS c
        SET message = $2, updated_at = NOW()
        WHERE c.id = $1 AND {}
        RETURNING {}
        "#,
        live("c"),
        COMMENT_COLUMNS
    )
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn create(
        &self,
        owner: UserId,
        photo_id: PhotoId,
        message: String,
    ) -> Result<Comment, DomainError> {
        let row = sqlx::query(&insert_sql())
            .bind(&message)
            .bind(photo_id.value())
            .bind(owner.value())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("create comment", e))?;

        row_to_comment(&row)
    }

    async fn get(&self, id: CommentId) -> Result<Option<Comment>, DomainError> {
        let row = sqlx::query(&select_by_id_sql())
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get comment", e))?;

        row.as_ref().map(row_to_comment).transpose()
    }

    async fn list_by_photo(
        &self,
        photo_id: PhotoId,
    ) -> Result<Vec<CommentWithRelations>, DomainError> {
        let rows = sqlx::query(&list_by_photo_sql())
            .bind(photo_id.value())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list comments", e))?;

        let mut comments = Vec::with_capacity(rows.len());

        for row in &rows {
            comments.push(CommentWithRelations {
                comment: row_to_comment(row)?,
                user: row_to_owner(row)?,
                photo: row_to_photo_summary(row)?,
            });
        }

        Ok(comments)
    }

    async fn update(&self, comment: &Comment) -> Result<Comment, DomainError> {
        let row = sqlx::query(&update_sql())
            .bind(comment.id().value())
            .bind(comment.message())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("update comment", e))?;

        match row {
            Some(row) => row_to_comment(&row),
            None => Err(DomainError::not_found(format!(
                "comment {} not found",
                comment.id()
            ))),
        }
    }

    async fn soft_delete(&self, id: CommentId) -> Result<bool, DomainError> {
        let result = sqlx::query(&soft_delete_sql("comments", "c"))
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete comment", e))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_comment(row: &PgRow) -> Result<Comment, DomainError> {
    Ok(Comment::from_parts(
        CommentId::new(row.try_get("id").map_err(read_error("comment"))?),
        UserId::new(row.try_get("user_id").map_err(read_error("comment"))?),
        PhotoId::new(row.try_get("photo_id").map_err(read_error("comment"))?),
        row.try_get("message").map_err(read_error("comment"))?,
        row.try_get("created_at").map_err(read_error("comment"))?,
        row.try_get("updated_at").map_err(read_error("comment"))?,
    ))
}

fn row_to_photo_summary(row: &PgRow) -> Result<Option<PhotoSummary>, DomainError> {
    let id: Option<i64> = row.try_get("rel_photo_id").map_err(read_error("photo relation"))?;

    let Some(id) = id else {
        return Ok(None);
    };

    Ok(Some(PhotoSummary {
        id: PhotoId::new(id),
        title: row.try_get("rel_title").map_err(read_error("photo relation"))?,
        caption: row.try_get("rel_caption").map_err(read_error("photo relation"))?,
        photo_url: row.try_get("rel_url").map_err(read_error("photo relation"))?,
        user_id: UserId::new(row.try_get("rel_user_id").map_err(read_error("photo relation"))?),
    }))
}
