//! Photo infrastructure module

mod postgres_repository;
mod service;

pub use postgres_repository::PostgresPhotoRepository;
pub use service::PhotoService;
