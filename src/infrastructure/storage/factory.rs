//! Storage factory for runtime backend selection

use std::sync::Arc;

use crate::domain::{CommentRepository, DomainError, PhotoRepository, SocialMediaRepository, UserRepository};
use crate::infrastructure::comment::PostgresCommentRepository;
use crate::infrastructure::photo::PostgresPhotoRepository;
use crate::infrastructure::social_media::PostgresSocialMediaRepository;
use crate::infrastructure::user::PostgresUserRepository;

use super::in_memory::InMemoryStore;
use super::postgres::{connect, PostgresConfig};

/// Supported storage types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl StorageType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    InMemory,
    Postgres(PostgresConfig),
}

impl StorageConfig {
    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres(_) => StorageType::Postgres,
        }
    }
}

/// One repository per resource, all backed by the same store
#[derive(Debug, Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub photos: Arc<dyn PhotoRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub social_medias: Arc<dyn SocialMediaRepository>,
}

impl Repositories {
    /// Repositories sharing a single in-memory store
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());

        Self {
            users: store.clone(),
            photos: store.clone(),
            comments: store.clone(),
            social_medias: store,
        }
    }
}

/// Factory for creating repository sets
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Creates the repositories for the configured backend
    pub async fn create(config: &StorageConfig) -> Result<Repositories, DomainError> {
        match config {
            StorageConfig::InMemory => Ok(Repositories::in_memory()),
            StorageConfig::Postgres(pg_config) => {
                let pool = connect(pg_config).await?;

                Ok(Repositories {
                    users: Arc::new(PostgresUserRepository::new(pool.clone())),
                    photos: Arc::new(PostgresPhotoRepository::new(pool.clone())),
                    comments: Arc::new(PostgresCommentRepository::new(pool.clone())),
                    social_medias: Arc::new(PostgresSocialMediaRepository::new(pool)),
                })
            }
        }
    }
}
