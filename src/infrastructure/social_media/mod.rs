//! Social media infrastructure module

mod postgres_repository;
mod service;

pub use postgres_repository::PostgresSocialMediaRepository;
pub use service::SocialMediaService;
