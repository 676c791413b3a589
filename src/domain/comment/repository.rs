use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Comment, CommentWithRelations};
use crate::domain::id::{CommentId, PhotoId, UserId};
use crate::domain::DomainError;

/// Repository trait for comment storage
#[async_trait]
pub trait CommentRepository: Send + Sync + Debug {
    async fn create(
        &self,
        owner: UserId,
        photo_id: PhotoId,
        message: String,
    ) -> Result<Comment, DomainError>;

    async fn get(&self, id: CommentId) -> Result<Option<Comment>, DomainError>;

    /// Comments on one photo with their author and photo relations
    async fn list_by_photo(&self, photo_id: PhotoId)
        -> Result<Vec<CommentWithRelations>, DomainError>;

    /// Persist the message and updated_at
    async fn update(&self, comment: &Comment) -> Result<Comment, DomainError>;

    async fn soft_delete(&self, id: CommentId) -> Result<bool, DomainError>;
}
