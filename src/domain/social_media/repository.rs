use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{SocialMedia, SocialMediaContent, SocialMediaWithOwner};
use crate::domain::id::{SocialMediaId, UserId};
use crate::domain::DomainError;

/// Repository trait for social media links
#[async_trait]
pub trait SocialMediaRepository: Send + Sync + Debug {
    async fn create(
        &self,
        owner: UserId,
        content: SocialMediaContent,
    ) -> Result<SocialMedia, DomainError>;

    async fn get(&self, id: SocialMediaId) -> Result<Option<SocialMedia>, DomainError>;

    async fn list_by_user(&self, user_id: UserId)
        -> Result<Vec<SocialMediaWithOwner>, DomainError>;

    async fn update(&self, social_media: &SocialMedia) -> Result<SocialMedia, DomainError>;

    async fn soft_delete(&self, id: SocialMediaId) -> Result<bool, DomainError>;
}
