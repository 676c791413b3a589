//! PostgreSQL connection pooling and shared query helpers

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use crate::domain::{DomainError, UserId, UserSummary};

/// Owner relation selected from a `users u` join, read back by [`row_to_owner`]
pub(crate) const OWNER_COLUMNS: &str =
    "u.id AS owner_id, u.email AS owner_email, u.username AS owner_username";

/// PostgreSQL connection configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/mygram".to_string(),
            max_connections: 10,
            connect_timeout_secs: 30,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }
}

/// Open a connection pool and make sure the database answers
pub async fn connect(config: &PostgresConfig) -> Result<PgPool, DomainError> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect(&config.url)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))
}

/// Row filter excluding soft-deleted records of the aliased table
pub(crate) fn live(alias: &str) -> String {
    format!("{}.deleted_at IS NULL", alias)
}

/// `UPDATE … SET deleted_at = NOW()` for one live row of the aliased table
pub(crate) fn soft_delete_sql(table: &str, alias: &str) -> String {
    format!(
        "UPDATE {table} AS {alias} SET deleted_at = NOW() WHERE {alias}.id = $1 AND {}",
        live(alias)
    )
}

/// Column read failure for rows of the named kind
pub(crate) fn read_error(kind: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::storage(format!("Failed to read {} row: {}", kind, e))
}

/// Owner columns of a LEFT JOIN; all NULL when the owner is deleted
pub(crate) fn row_to_owner(row: &PgRow) -> Result<Option<UserSummary>, DomainError> {
    let owner_id: Option<i64> = row.try_get("owner_id").map_err(read_error("owner"))?;

    let Some(id) = owner_id else {
        return Ok(None);
    };

    Ok(Some(UserSummary {
        id: UserId::new(id),
        email: row.try_get("owner_email").map_err(read_error("owner"))?,
        username: row.try_get("owner_username").map_err(read_error("owner"))?,
    }))
}

/// Map a sqlx error, turning unique violations into conflicts
pub(crate) fn map_sqlx_error(action: &str, error: sqlx::Error) -> DomainError {
    let unique_violation = error
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation());

    if unique_violation {
        DomainError::conflict(format!("Failed to {}: record already exists", action))
    } else {
        DomainError::storage(format!("Failed to {}: {}", action, error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_predicate() {
        assert_eq!(live("p"), "p.deleted_at IS NULL");
    }

    #[test]
    fn test_config_builder() {
        let config = PostgresConfig::new("postgres://db/mygram").with_max_connections(4);
        assert_eq!(config.url, "postgres://db/mygram");
        assert_eq!(config.max_connections, 4);
    }

    #[test]
    fn test_soft_delete_sql() {
        assert_eq!(
            soft_delete_sql("photos", "p"),
            "UPDATE photos AS p SET deleted_at = NOW() WHERE p.id = $1 AND p.deleted_at IS NULL"
        );
    }

    #[test]
    fn test_owner_columns_match_reader() {
        for alias in ["owner_id", "owner_email", "owner_username"] {
            assert!(OWNER_COLUMNS.contains(&format!("AS {}", alias)));
        }
        assert!(OWNER_COLUMNS.split(", ").all(|column| column.starts_with("u.")));
    }

    #[test]
    fn test_read_error_names_row_kind() {
        let error = read_error("comment")(sqlx::Error::RowNotFound);

        assert!(matches!(error, DomainError::Storage { .. }));
        assert!(error.message().starts_with("Failed to read comment row"));
    }

    #[test]
    fn test_non_database_error_is_storage() {
        let error = map_sqlx_error("load photo", sqlx::Error::RowNotFound);
        assert!(matches!(error, DomainError::Storage { .. }));
    }
}
