//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::auth::TokenCodec;
use crate::infrastructure::comment::CommentService;
use crate::infrastructure::photo::PhotoService;
use crate::infrastructure::social_media::SocialMediaService;
use crate::infrastructure::storage::Repositories;
use crate::infrastructure::user::{PasswordHasher, UserService};

use super::middleware::PublicCredentials;

/// Application state shared by every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub tokens: Arc<dyn TokenCodec>,
    /// Static pair guarding `/public`; `None` leaves it open
    pub public_credentials: Option<Arc<PublicCredentials>>,
    pub user_service: Arc<UserService>,
    pub photo_service: Arc<PhotoService>,
    pub comment_service: Arc<CommentService>,
    pub social_media_service: Arc<SocialMediaService>,
}

impl AppState {
    /// Wire the services on top of a repository set
    pub fn new(
        repositories: Repositories,
        tokens: Arc<dyn TokenCodec>,
        hasher: Arc<dyn PasswordHasher>,
        public_credentials: Option<PublicCredentials>,
    ) -> Self {
        let Repositories {
            users,
            photos,
            comments,
            social_medias,
        } = repositories;

        Self {
            user_service: Arc::new(UserService::new(users, hasher, tokens.clone())),
            photo_service: Arc::new(PhotoService::new(photos.clone())),
            comment_service: Arc::new(CommentService::new(comments, photos)),
            social_media_service: Arc::new(SocialMediaService::new(social_medias)),
            public_credentials: public_credentials.map(Arc::new),
            tokens,
        }
    }
}
