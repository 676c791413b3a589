//! Comment domain

mod entity;
mod repository;

pub use entity::{Comment, CommentMessage, CommentWithRelations, NewComment};
pub use repository::CommentRepository;
