//! Infrastructure layer - persistence, credentials and resource services

pub mod auth;
pub mod comment;
pub mod logging;
pub mod photo;
pub mod social_media;
pub mod storage;
pub mod user;
