//! Domain layer - entities, ownership rules and repository traits

pub mod comment;
pub mod error;
pub mod id;
pub mod photo;
pub mod principal;
pub mod social_media;
pub mod user;

pub use comment::{Comment, CommentMessage, CommentRepository, CommentWithRelations, NewComment};
pub use error::DomainError;
pub use id::{CommentId, PhotoId, SocialMediaId, UserId};
pub use photo::{Photo, PhotoContent, PhotoRepository, PhotoSummary, PhotoWithOwner};
pub use principal::{DeleteOutcome, Owned, Principal};
pub use social_media::{
    SocialMedia, SocialMediaContent, SocialMediaRepository, SocialMediaWithOwner,
};
pub use user::{NewUser, User, UserRepository, UserSummary};
