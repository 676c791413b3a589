//! Photo domain

mod entity;
mod repository;

pub use entity::{Photo, PhotoContent, PhotoSummary, PhotoWithOwner};
pub use repository::PhotoRepository;
