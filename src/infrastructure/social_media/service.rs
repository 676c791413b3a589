//! Social media service

use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::domain::social_media::{
    SocialMedia, SocialMediaContent, SocialMediaRepository, SocialMediaWithOwner,
};
use crate::domain::{DeleteOutcome, DomainError, Principal, SocialMediaId, UserId};

#[derive(Debug, Clone)]
pub struct SocialMediaService {
    repository: Arc<dyn SocialMediaRepository>,
}

impl SocialMediaService {
    pub fn new(repository: Arc<dyn SocialMediaRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(
        &self,
        principal: &Principal,
        content: SocialMediaContent,
    ) -> Result<SocialMedia, DomainError> {
        content.validate()?;

        let link = self.repository.create(principal.user_id, content).await?;
        info!(social_media_id = %link.id(), user_id = %principal.user_id, "Social media created");
        Ok(link)
    }

    pub async fn list_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<SocialMediaWithOwner>, DomainError> {
        let links = self.repository.list_by_user(user_id).await?;

        if links.is_empty() {
            return Err(DomainError::not_found(format!(
                "no social media found for user {}",
                user_id
            )));
        }

        Ok(links)
    }

    pub async fn get(&self, id: SocialMediaId) -> Result<SocialMedia, DomainError> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("social media {} not found", id)))
    }

    pub async fn update(
        &self,
        principal: &Principal,
        id: SocialMediaId,
        content: SocialMediaContent,
    ) -> Result<SocialMedia, DomainError> {
        let mut link = self.get(id).await?;
        principal.ensure_owner_of(&link)?;
        content.validate()?;

        link.apply(content);
        let link = self.repository.update(&link).await?;

        info!(social_media_id = %id, "Social media updated");
        Ok(link)
    }

    pub async fn delete(
        &self,
        principal: &Principal,
        id: SocialMediaId,
    ) -> Result<DeleteOutcome, DomainError> {
        let Some(link) = self.repository.get(id).await? else {
            return Ok(DeleteOutcome::AlreadyAbsent);
        };
        principal.ensure_owner_of(&link)?;

        if self.repository.soft_delete(id).await? {
            info!(social_media_id = %id, "Social media deleted");
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::AlreadyAbsent)
        }
    }
}
