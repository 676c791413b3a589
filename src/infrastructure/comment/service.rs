//! Comment service

use std::sync::Arc;

use tracing::{debug, info};
use validator::Validate;

use crate::domain::comment::{
    Comment, CommentMessage, CommentRepository, CommentWithRelations, NewComment,
};
use crate::domain::photo::PhotoRepository;
use crate::domain::{CommentId, DeleteOutcome, DomainError, PhotoId, Principal};

/// Comment service; creating a comment requires its photo to exist
#[derive(Debug, Clone)]
pub struct CommentService {
    repository: Arc<dyn CommentRepository>,
    photos: Arc<dyn PhotoRepository>,
}

impl CommentService {
    pub fn new(repository: Arc<dyn CommentRepository>, photos: Arc<dyn PhotoRepository>) -> Self {
        Self { repository, photos }
    }

    pub async fn create(
        &self,
        principal: &Principal,
        request: NewComment,
    ) -> Result<Comment, DomainError> {
        request.validate()?;

        let photo_id = PhotoId::new(request.photo_id);
        if self.photos.get(photo_id).await?.is_none() {
            return Err(DomainError::not_found(format!("photo {} not found", photo_id)));
        }

        let comment = self
            .repository
            .create(principal.user_id, photo_id, request.message)
            .await?;

        info!(comment_id = %comment.id(), photo_id = %photo_id, "Comment created");
        Ok(comment)
    }

    /// Comments on a photo with author and photo; an empty result is `NotFound`
    pub async fn list_by_photo(
        &self,
        photo_id: PhotoId,
    ) -> Result<Vec<CommentWithRelations>, DomainError> {
        let comments = self.repository.list_by_photo(photo_id).await?;

        if comments.is_empty() {
            return Err(DomainError::not_found(format!(
                "no comments found for photo {}",
                photo_id
            )));
        }

        Ok(comments)
    }

    pub async fn get(&self, id: CommentId) -> Result<Comment, DomainError> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("comment {} not found", id)))
    }

    /// Replace the message of the caller's own comment
    pub async fn update(
        &self,
        principal: &Principal,
        id: CommentId,
        request: CommentMessage,
    ) -> Result<Comment, DomainError> {
        let mut comment = self.get(id).await?;
        principal.ensure_owner_of(&comment)?;
        request.validate()?;

        comment.set_message(request.message);
        let comment = self.repository.update(&comment).await?;

        info!(comment_id = %id, "Comment updated");
        Ok(comment)
    }

    pub async fn delete(
        &self,
        principal: &Principal,
        id: CommentId,
    ) -> Result<DeleteOutcome, DomainError> {
        let Some(comment) = self.repository.get(id).await? else {
            debug!(comment_id = %id, "Comment already absent");
            return Ok(DeleteOutcome::AlreadyAbsent);
        };
        principal.ensure_owner_of(&comment)?;

        if self.repository.soft_delete(id).await? {
            info!(comment_id = %id, "Comment deleted");
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::AlreadyAbsent)
        }
    }
}
