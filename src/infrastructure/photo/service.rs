//! Photo service - ownership rules around photo persistence

use std::sync::Arc;

use tracing::{debug, info};
use validator::Validate;

use crate::domain::photo::{Photo, PhotoContent, PhotoRepository, PhotoWithOwner};
use crate::domain::{DeleteOutcome, DomainError, PhotoId, Principal, UserId};

/// Photo service for CRUD operations
#[derive(Debug, Clone)]
pub struct PhotoService {
    repository: Arc<dyn PhotoRepository>,
}

impl PhotoService {
    /// Create a new PhotoService with the given repository
    pub fn new(repository: Arc<dyn PhotoRepository>) -> Self {
        Self { repository }
    }

    /// Post a photo owned by the caller
    pub async fn create(
        &self,
        principal: &Principal,
        content: PhotoContent,
    ) -> Result<Photo, DomainError> {
        content.validate()?;

        let photo = self.repository.create(principal.user_id, content).await?;
        info!(photo_id = %photo.id(), user_id = %principal.user_id, "Photo created");
        Ok(photo)
    }

    /// Photos of a user with their owner; an empty result is `NotFound`
    pub async fn list_by_user(&self, user_id: UserId) -> Result<Vec<PhotoWithOwner>, DomainError> {
        let photos = self.repository.list_by_user(user_id).await?;

        if photos.is_empty() {
            return Err(DomainError::not_found(format!(
                "no photos found for user {}",
                user_id
            )));
        }

        Ok(photos)
    }

    /// Get a photo, returning an error if not found
    pub async fn get(&self, id: PhotoId) -> Result<Photo, DomainError> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("photo {} not found", id)))
    }

    pub async fn update(
        &self,
        principal: &Principal,
        id: PhotoId,
        content: PhotoContent,
    ) -> Result<Photo, DomainError> {
        debug!(photo_id = %id, "Updating photo");

        let mut photo = self.get(id).await?;
        principal.ensure_owner_of(&photo)?;
        content.validate()?;

        photo.apply(content);
        let photo = self.repository.update(&photo).await?;

        info!(photo_id = %id, "Photo updated");
        Ok(photo)
    }

    pub async fn delete(
        &self,
        principal: &Principal,
        id: PhotoId,
    ) -> Result<DeleteOutcome, DomainError> {
        let Some(photo) = self.repository.get(id).await? else {
            debug!(photo_id = %id, "Photo already absent");
            return Ok(DeleteOutcome::AlreadyAbsent);
        };
        principal.ensure_owner_of(&photo)?;

        if self.repository.soft_delete(id).await? {
            info!(photo_id = %id, "Photo deleted");
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::AlreadyAbsent)
        }
    }
}
