//! PostgreSQL social media repository implementation

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::social_media::{
    SocialMedia, SocialMediaContent, SocialMediaRepository, SocialMediaWithOwner,
};
use crate::domain::{DomainError, SocialMediaId, UserId};
use crate::infrastructure::storage::{
    live, map_sqlx_error, read_error, row_to_owner, soft_delete_sql, OWNER_COLUMNS,
};

const SOCIAL_MEDIA_COLUMNS: &str = "s.id, s.name, s.url, s.user_id, s.created_at, s.updated_at";

/// PostgreSQL implementation of SocialMediaRepository
#[derive(Debug, Clone)]
pub struct PostgresSocialMediaRepository {
    pool: PgPool,
}

impl PostgresSocialMediaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn insert_sql() -> String {
    format!(
        r#"
        INSERT INTO social_medias AS s (name, url, user_id, created_at, updated_at)
        VALUES ($1, $2, $3, NOW(), NOW())
        RETURNING {}
        "#,
        SOCIAL_MEDIA_COLUMNS
    )
}

fn select_by_id_sql() -> String {
    format!(
        "SELECT {} FROM social_medias s WHERE s.id = $1 AND {}",
        SOCIAL_MEDIA_COLUMNS,
        live("s")
    )
}

fn list_by_user_sql() -> String {
    format!(
        r#"
        SELECT {}, {}
        FROM social_medias s
        LEFT JOIN users u ON u.id = s.user_id AND {}
        WHERE s.user_id = $1 AND {}
        ORDER BY s.id
        "#,
        SOCIAL_MEDIA_COLUMNS,
        OWNER_COLUMNS,
        live("u"),
        live("s")
    )
}

fn update_sql() -> String {
    format!(
        r#"
        UPDATE social_medias AS s
        SET name = $2, url = $3, updated_at = NOW()
        WHERE s.id = $1 AND {}
        RETURNING {}
        "#,
        live("s"),
        SOCIAL_MEDIA_COLUMNS
    )
}

#[async_trait]
impl SocialMediaRepository for PostgresSocialMediaRepository {
    async fn create(
        &self,
        owner: UserId,
        content: SocialMediaContent,
    ) -> Result<SocialMedia, DomainError> {
        let row = sqlx::query(&insert_sql())
            .bind(&content.name)
            .bind(&content.social_media_url)
            .bind(owner.value())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("create social media", e))?;

        row_to_social_media(&row)
    }

    async fn get(&self, id: SocialMediaId) -> Result<Option<SocialMedia>, DomainError> {
        let row = sqlx::query(&select_by_id_sql())
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get social media", e))?;

        row.as_ref().map(row_to_social_media).transpose()
    }

    async fn list_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<SocialMediaWithOwner>, DomainError> {
        let rows = sqlx::query(&list_by_user_sql())
            .bind(user_id.value())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list social media", e))?;

        let mut entries = Vec::with_capacity(rows.len());

        for row in &rows {
            entries.push(SocialMediaWithOwner {
                social_media: row_to_social_media(row)?,
                user: row_to_owner(row)?,
            });
        }

        Ok(entries)
    }

    async fn update(&self, social_media: &SocialMedia) -> Result<SocialMedia, DomainError> {
        let row = sqlx::query(&update_sql())
            .bind(social_media.id().value())
            .bind(social_media.name())
            .bind(social_media.social_media_url())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("update social media", e))?;

        match row {
            Some(row) => row_to_social_media(&row),
            None => Err(DomainError::not_found(format!(
                "social media {} not found",
                social_media.id()
            ))),
        }
    }

    async fn soft_delete(&self, id: SocialMediaId) -> Result<bool, DomainError> {
        let result = sqlx::query(&soft_delete_sql("social_medias", "s"))
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete social media", e))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_social_media(row: &PgRow) -> Result<SocialMedia, DomainError> {
    let content = SocialMediaContent {
        name: row.try_get("name").map_err(read_error("social media"))?,
        social_media_url: row.try_get("url").map_err(read_error("social media"))?,
    };

    Ok(SocialMedia::from_parts(
        SocialMediaId::new(row.try_get("id").map_err(read_error("social media"))?),
        UserId::new(row.try_get("user_id").map_err(read_error("social media"))?),
        content,
        row.try_get("created_at").map_err(read_error("social media"))?,
        row.try_get("updated_at").map_err(read_error("social media"))?,
    ))
}
