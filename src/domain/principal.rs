//! Verified identity of the caller and the ownership rule built on it

use serde::Serialize;

use super::id::UserId;
use super::DomainError;

/// Identity bound to a request after its bearer token was verified
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub user_id: UserId,
    pub username: String,
}

impl Principal {
    pub fn new(user_id: UserId, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
        }
    }

    /// Fails with `Forbidden` unless this principal is the given owner
    pub fn ensure_owns(&self, owner: UserId) -> Result<(), DomainError> {
        if self.user_id != owner {
            return Err(DomainError::forbidden("invalid user request"));
        }

        Ok(())
    }

    /// Ownership check against a loaded record
    pub fn ensure_owner_of<T: Owned>(&self, record: &T) -> Result<(), DomainError> {
        self.ensure_owns(record.owner_id())
    }
}

/// A record that belongs to exactly one user for its whole lifetime
pub trait Owned {
    fn owner_id(&self) -> UserId;
}

/// Result of a delete request
///
/// Deleting an id that is absent (or already soft-deleted) is a no-op
/// rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    AlreadyAbsent,
}
