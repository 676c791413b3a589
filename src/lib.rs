//! MyGram API
//!
//! A photo sharing backend with:
//! - JWT bearer authentication and an anonymous public token
//! - Users, photos, comments and social media links
//! - Owner-only mutation and soft delete
//! - PostgreSQL or in-memory storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use anyhow::Context;
use api::middleware::PublicCredentials;
use api::state::AppState;
use config::AuthConfig;
use infrastructure::{
    auth::{JwtConfig, JwtService},
    storage::{PostgresConfig, StorageConfig, StorageFactory, StorageType},
    user::{Argon2Hasher, PasswordCost},
};
use rand::Rng;
use tracing::info;

/// Create the application state from configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage_type = StorageType::from_str(&config.storage.backend)
        .with_context(|| format!("unknown storage backend '{}'", config.storage.backend))?;

    let storage_config = match storage_type {
        StorageType::InMemory => StorageConfig::InMemory,
        StorageType::Postgres => {
            let url = config
                .database
                .url
                .as_deref()
                .context("database.url is required for the postgres backend")?;

            StorageConfig::Postgres(
                PostgresConfig::new(url).with_max_connections(config.database.max_connections),
            )
        }
    };

    let repositories = StorageFactory::create(&storage_config).await?;
    info!(backend = ?storage_type, "Storage initialized");

    let tokens = Arc::new(create_jwt_service(&config.auth)?);

    let hasher = Arc::new(Argon2Hasher::new(PasswordCost {
        memory_kib: config.password.memory_kib,
        iterations: config.password.iterations,
        parallelism: config.password.parallelism,
    })?);

    let public_credentials =
        config
            .auth
            .public_credentials()
            .map(|(username, password)| PublicCredentials {
                username: username.to_string(),
                password: password.to_string(),
            });

    if public_credentials.is_some() {
        info!("Basic credentials required for /public");
    }

    Ok(AppState::new(repositories, tokens, hasher, public_credentials))
}

/// Generate a random JWT secret
fn generate_random_secret() -> String {
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

/// Create the token codec from the auth section (configured or random secret)
fn create_jwt_service(auth: &AuthConfig) -> anyhow::Result<JwtService> {
    if auth.token_ttl_secs <= 0 {
        anyhow::bail!(
            "auth.token_ttl_secs must be positive, got {}",
            auth.token_ttl_secs
        );
    }

    let secret = match auth.jwt_secret.as_deref() {
        Some(secret) if !secret.trim().is_empty() => secret.to_string(),
        _ => {
            tracing::warn!(
                "No auth.jwt_secret configured. Generating random secret. \
                Tokens will NOT survive a restart. \
                Set APP__AUTH__JWT_SECRET for persistent tokens."
            );
            generate_random_secret()
        }
    };

    Ok(JwtService::new(JwtConfig::new(
        secret,
        auth.issuer.clone(),
        auth.audience.clone(),
        auth.token_ttl_secs,
    )))
}
