//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{NewUser, User};
use crate::domain::id::UserId;
use crate::domain::DomainError;

/// Repository trait for user storage
///
/// Every read excludes soft-deleted accounts.
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Insert a new user and return it with its assigned id
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// Get a live user by id
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Get a live user by email (for login and uniqueness checks)
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Persist the editable fields of an existing user
    async fn update(&self, user: &User) -> Result<User, DomainError>;

    /// Mark a user as deleted; returns false when no live user had that id
    async fn soft_delete(&self, id: UserId) -> Result<bool, DomainError>;

    /// Check whether a live account other than `except` uses this email
    async fn email_taken(&self, email: &str, except: Option<UserId>) -> Result<bool, DomainError> {
        Ok(self
            .get_by_email(email)
            .await?
            .is_some_and(|owner| Some(owner.id()) != except))
    }
}
