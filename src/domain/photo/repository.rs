//! Photo repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Photo, PhotoContent, PhotoWithOwner};
use crate::domain::id::{PhotoId, UserId};
use crate::domain::DomainError;

/// Repository trait for photo storage
///
/// Every read excludes soft-deleted photos.
#[async_trait]
pub trait PhotoRepository: Send + Sync + Debug {
    async fn create(&self, owner: UserId, content: PhotoContent) -> Result<Photo, DomainError>;

    async fn get(&self, id: PhotoId) -> Result<Option<Photo>, DomainError>;

    /// Photos of one user, each with its owner relation
    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<PhotoWithOwner>, DomainError>;

    /// Persist title, caption, url and updated_at; never the owner
    async fn update(&self, photo: &Photo) -> Result<Photo, DomainError>;

    async fn soft_delete(&self, id: PhotoId) -> Result<bool, DomainError>;
}
