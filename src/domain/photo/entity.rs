//! Photo entity and its relations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::id::{PhotoId, UserId};
use crate::domain::principal::Owned;
use crate::domain::user::UserSummary;

/// Editable part of a photo, as submitted by clients
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PhotoContent {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "caption is required"))]
    pub caption: String,
    #[validate(length(min = 1, message = "photo_url is required"))]
    pub photo_url: String,
}

/// A photo posted by a user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Photo {
    id: PhotoId,
    #[serde(flatten)]
    content: PhotoContent,
    user_id: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Photo relation loaded alongside comments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoSummary {
    pub id: PhotoId,
    pub title: String,
    pub caption: String,
    pub photo_url: String,
    pub user_id: UserId,
}

/// Photo listing entry with its owner eagerly loaded
#[derive(Debug, Clone, Serialize)]
pub struct PhotoWithOwner {
    #[serde(flatten)]
    pub photo: Photo,
    /// `None` when the owner account has been deleted
    #[serde(rename = "User")]
    pub user: Option<UserSummary>,
}

impl Photo {
    pub fn from_parts(
        id: PhotoId,
        user_id: UserId,
        content: PhotoContent,
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

    pub fn id(&self) -> PhotoId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn content(&self) -> &PhotoContent {
        &self.content
    }

    pub fn title(&self) -> &str {
        &self.content.title
    }

    pub fn caption(&self) -> &str {
        &self.content.caption
    }

    pub fn photo_url(&self) -> &str {
        &self.content.photo_url
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn summary(&self) -> PhotoSummary {
        PhotoSummary {
            id: self.id,
            title: self.content.title.clone(),
            caption: self.content.caption.clone(),
            photo_url: self.content.photo_url.clone(),
            user_id: self.user_id,
        }
    }

    /// Replace title, caption and url; the owner is left untouched
    pub fn apply(&mut self, content: PhotoContent) {
        self.content = content;
        self.updated_at = Utc::now();
    }
}

impl Owned for Photo {
    fn owner_id(&self) -> UserId {
        self.user_id
    }
}
