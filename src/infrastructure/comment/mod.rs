//! Comment infrastructure module

mod postgres_repository;
mod service;

pub use postgres_repository::PostgresCommentRepository;
pub use service::CommentService;
