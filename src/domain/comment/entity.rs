use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::id::{CommentId, PhotoId, UserId};
use crate::domain::photo::PhotoSummary;
use crate::domain::principal::Owned;
use crate::domain::user::UserSummary;

/// Payload of a new comment
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(default)]
pub struct NewComment {
    #[validate(length(min = 1, message = "message is required"))]
    pub message: String,
    #[validate(range(min = 1, message = "photo_id is required"))]
    pub photo_id: i64,
}

/// Payload of a comment edit; only the message can change
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(default)]
pub struct CommentMessage {
    #[validate(length(min = 1, message = "message is required"))]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    id: CommentId,
    message: String,
    photo_id: PhotoId,
    user_id: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Comment listing entry with author and photo eagerly loaded
#[derive(Debug, Clone, Serialize)]
pub struct CommentWithRelations {
    #[serde(flatten)]
    pub comment: Comment,
    #[serde(rename = "User")]
    pub user: Option<UserSummary>,
    #[serde(rename = "Photo")]
    pub photo: Option<PhotoSummary>,
}

impl Comment {
    pub fn from_parts(
        id: CommentId,
        user_id: UserId,
        photo_id: PhotoId,
        message: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            message,
            photo_id,
            user_id,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> CommentId {
        self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn photo_id(&self) -> PhotoId {
        self.photo_id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn set_message(&mut self, message: String) {
        self.message = message;
        self.updated_at = Utc::now();
    }
}

impl Owned for Comment {
    fn owner_id(&self) -> UserId {
        self.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_comment_requires_photo_id() {
        let parsed: NewComment = serde_json::from_str(r#"{"message": "nice"}"#).unwrap();
        let errors = parsed.validate().unwrap_err();

        assert!(errors.field_errors().contains_key("photo_id"));
        assert!(!errors.field_errors().contains_key("message"));
    }

    #[test]
    fn test_relations_serialize_as_null_when_absent() {
        let now = Utc::now();
        let entry = CommentWithRelations {
            comment: Comment::from_parts(
                CommentId::new(1),
                UserId::new(2),
                PhotoId::new(3),
                "nice".to_string(),
                now,
                now,
            ),
            user: None,
            photo: None,
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["message"], "nice");
        assert_eq!(json["photo_id"], 3);
        assert!(json["User"].is_null());
        assert!(json["Photo"].is_null());
    }
}
