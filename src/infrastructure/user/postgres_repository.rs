//! PostgreSQL user repository implementation

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::user::{NewUser, User, UserRepository};
use crate::domain::{DomainError, UserId};
use crate::infrastructure::storage::{live, map_sqlx_error, read_error, soft_delete_sql};

const USER_COLUMNS: &str = "u.id, u.username, u.email, u.password, u.dob, u.created_at, u.updated_at";

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn insert_sql() -> String {
    format!(
        r#"
        INSERT INTO users AS u (username, email, password, dob, created_at, updated_at)
        VALUES ($1, $2, $3, $4, NOW(), NOW())
        RETURNING {}
        "#,
        USER_COLUMNS
    )
}

/// Live user lookup by a single column bound to `$1`
fn select_by_sql(column: &str) -> String {
    format!(
        "SELECT {} FROM users u WHERE u.{} = $1 AND {}",
        USER_COLUMNS,
        column,
        live("u")
    )
}

fn update_sql() -> String {
    format!(
        r#"
        UPDATE users AS u
        SET email = $2, username = $3, updated_at = NOW()
        WHERE u.id = $1 AND {}
        RETURNING {}
        "#,
        live("u"),
        USER_COLUMNS
    )
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let row = sqlx::query(&insert_sql())
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.dob)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("create user", e))?;

        row_to_user(&row)
    }

    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&select_by_sql("id"))
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get user", e))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&select_by_sql("email"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get user by email", e))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let row = sqlx::query(&update_sql())
            .bind(user.id().value())
            .bind(user.email())
            .bind(user.username())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("update user", e))?;

        match row {
            Some(row) => row_to_user(&row),
            None => Err(DomainError::not_found(format!("user {} not found", user.id()))),
        }
    }

    async fn soft_delete(&self, id: UserId) -> Result<bool, DomainError> {
        let result = sqlx::query(&soft_delete_sql("users", "u"))
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete user", e))?;

        Ok(result.rows_affected() > 0)
    }
}

/// Convert a database row to a User entity
fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
    let new_user = NewUser {
        username: row.try_get("username").map_err(read_error("user"))?,
        email: row.try_get("email").map_err(read_error("user"))?,
        password_hash: row.try_get("password").map_err(read_error("user"))?,
        dob: row.try_get("dob").map_err(read_error("user"))?,
    };

    Ok(User::from_parts(
        UserId::new(row.try_get("id").map_err(read_error("user"))?),
        new_user,
        row.try_get("created_at").map_err(read_error("user"))?,
        row.try_get("updated_at").map_err(read_error("user"))?,
    ))
}
