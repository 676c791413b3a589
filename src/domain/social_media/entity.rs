use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::id::{SocialMediaId, UserId};
use crate::domain::principal::Owned;
use crate::domain::user::UserSummary;

/// Editable part of a social media link
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SocialMediaContent {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "social_media_url is required"))]
    pub social_media_url: String,
}

/// A link from a user to one of their external profiles
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SocialMedia {
    id: SocialMediaId,
    #[serde(flatten)]
    content: SocialMediaContent,
    user_id: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SocialMediaWithOwner {
    #[serde(flatten)]
    pub social_media: SocialMedia,
    #[serde(rename = "User")]
    pub user: Option<UserSummary>,
}

impl SocialMedia {
    pub fn from_parts(
        id: SocialMediaId,
        user_id: UserId,
        content: SocialMediaContent,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            content,
            user_id,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> SocialMediaId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn content(&self) -> &SocialMediaContent {
        &self.content
    }

    pub fn name(&self) -> &str {
        &self.content.name
    }

    pub fn social_media_url(&self) -> &str {
        &self.content.social_media_url
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn apply(&mut self, content: SocialMediaContent) {
        self.content = content;
        self.updated_at = Utc::now();
    }
}

impl Owned for SocialMedia {
    fn owner_id(&self) -> UserId {
        self.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_social_media_json_shape() {
        let now = Utc::now();
        let link = SocialMedia::from_parts(
            SocialMediaId::new(4),
            UserId::new(1),
            SocialMediaContent {
                name: "github".to_string(),
                social_media_url: "https://github.com/alice".to_string(),
            },
            now,
            now,
        );

        let json = serde_json::to_value(&link).unwrap();
        assert_eq!(json["id"], 4);
        assert_eq!(json["name"], "github");
        assert_eq!(json["social_media_url"], "https://github.com/alice");
        assert_eq!(json["user_id"], 1);
    }

    #[test]
    fn test_empty_url_fails_validation() {
        let content = SocialMediaContent {
            name: "github".to_string(),
            social_media_url: String::new(),
        };
        assert!(content.validate().is_err());
    }
}
