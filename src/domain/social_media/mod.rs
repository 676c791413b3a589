//! Social media link domain

mod entity;
mod repository;

pub use entity::{SocialMedia, SocialMediaContent, SocialMediaWithOwner};
pub use repository::SocialMediaRepository;
