//! PostgreSQL photo repository implementation

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::photo::{Photo, PhotoContent, PhotoRepository, PhotoWithOwner};
use crate::domain::{DomainError, PhotoId, UserId};
use crate::infrastructure::storage::{
    live, map_sqlx_error, read_error, row_to_owner, soft_delete_sql, OWNER_COLUMNS,
};

const PHOTO_COLUMNS: &str = "p.id, p.title, p.caption, p.url, p.user_id, p.created_at, p.updated_at";

/// PostgreSQL implementation of PhotoRepository
#[derive(Debug, Clone)]
pub struct PostgresPhotoRepository {
    pool: PgPool,
}

impl PostgresPhotoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn insert_sql() -> String {
    format!(
        r#"
        INSERT INTO photos AS p (title, caption, url, user_id, created_at, updated_at)
        VALUES ($1, $2, $3, $4, NOW(), NOW())
        RETURNING {}
        "#,
        PHOTO_COLUMNS
    )
}

fn select_by_id_sql() -> String {
    format!(
        "SELECT {} FROM photos p WHERE p.id = $1 AND {}",
        PHOTO_COLUMNS,
        live("p")
    )
}

fn list_by_user_sql() -> String {
    format!(
        r#"
        SELECT {}, {}
        FROM photos p
        LEFT JOIN users u ON u.id = p.user_id AND {}
        WHERE p.user_id = $1 AND {}
        ORDER BY p.id
        "#,
        PHOTO_COLUMNS,
        OWNER_COLUMNS,
        live("u"),
        live("p")
    )
}

fn update_sql() -> String {
    format!(
        r#"
        UPDATE photos AS p
        SET title = $2, caption = $3, url = $4, updated_at = NOW()
        WHERE p.id = $1 AND {}
        RETURNING {}
        "#,
        live("p"),
        PHOTO_COLUMNS
    )
}

#[async_trait]
impl PhotoRepository for PostgresPhotoRepository {
    async fn create(&self, owner: UserId, content: PhotoContent) -> Result<Photo, DomainError> {
        let row = sqlx::query(&insert_sql())
            .bind(&content.title)
            .bind(&content.caption)
            .bind(&content.photo_url)
            .bind(owner.value())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("create photo", e))?;

        row_to_photo(&row)
    }

    async fn get(&self, id: PhotoId) -> Result<Option<Photo>, DomainError> {
        let row = sqlx::query(&select_by_id_sql())
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get photo", e))?;

        row.as_ref().map(row_to_photo).transpose()
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<PhotoWithOwner>, DomainError> {
        let rows = sqlx::query(&list_by_user_sql())
            .bind(user_id.value())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list photos", e))?;

        let mut photos = Vec::with_capacity(rows.len());

        for row in &rows {
            photos.push(PhotoWithOwner {
                photo: row_to_photo(row)?,
                user: row_to_owner(row)?,
            });
        }

        Ok(photos)
    }

    async fn update(&self, photo: &Photo) -> Result<Photo, DomainError> {
        let row = sqlx::query(&update_sql())
            .bind(photo.id().value())
            .bind(photo.title())
            .bind(photo.caption())
            .bind(photo.photo_url())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("update photo", e))?;

        match row {
            Some(row) => row_to_photo(&row),
            None => Err(DomainError::not_found(format!("photo {} not found", photo.id()))),
        }
    }

    async fn soft_delete(&self, id: PhotoId) -> Result<bool, DomainError> {
        let result = sqlx::query(&soft_delete_sql("photos", "p"))
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete photo", e))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_photo(row: &PgRow) -> Result<Photo, DomainError> {
    let content = PhotoContent {
        title: row.try_get("title").map_err(read_error("photo"))?,
        caption: row.try_get("caption").map_err(read_error("photo"))?,
        photo_url: row.try_get("url").map_err(read_error("photo"))?,
    };

    Ok(Photo::from_parts(
        PhotoId::new(row.try_get("id").map_err(read_error("photo"))?),
        UserId::new(row.try_get("user_id").map_err(read_error("photo"))?),
        content,
        row.try_get("created_at").map_err(read_error("photo"))?,
        row.try_get("updated_at").map_err(read_error("photo"))?,
    ))
}
