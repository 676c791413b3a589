//! Request authentication extractors

pub mod basic_auth;
pub mod user_auth;

pub use basic_auth::{PublicAccess, PublicCredentials};
pub use user_auth::RequireUser;
