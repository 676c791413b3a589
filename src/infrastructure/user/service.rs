//! User service for registration, authentication and profile management

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info};
use validator::Validate;

use crate::domain::user::{validate_dob_today, validate_password, NewUser, User, UserRepository};
use crate::domain::{DeleteOutcome, DomainError, Principal, UserId};
use crate::infrastructure::auth::TokenCodec;

use super::password::PasswordHasher;

/// Request for registering a new account
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct SignUpRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(email(message = "email is invalid"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    /// Date of birth as `YYYY-MM-DD`
    #[validate(length(min = 1, message = "dob is required"))]
    pub dob: String,
}

/// Request for exchanging credentials for an access token
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    #[validate(email(message = "email is invalid"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Request for editing the caller's profile
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct EditUserRequest {
    #[validate(email(message = "email is invalid"))]
    pub email: String,
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
}

/// User service for authentication and management
#[derive(Debug, Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenCodec>,
}

impl UserService {
    /// Create a new user service
    pub fn new(
        repository: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenCodec>,
    ) -> Self {
        Self {
            repository,
            hasher,
            tokens,
        }
    }

    /// Register a new account
    pub async fn sign_up(&self, request: SignUpRequest) -> Result<User, DomainError> {
        request.validate()?;
        validate_password(&request.password)?;
        let dob = validate_dob_today(&request.dob)?;

        if self.repository.email_taken(&request.email, None).await? {
            return Err(DomainError::conflict(format!(
                "email {} already registered",
                request.email
            )));
        }

        let password_hash = self.hasher.hash(&request.password)?;

        let user = self
            .repository
            .create(NewUser {
                username: request.username,
                email: request.email,
                password_hash,
                dob,
            })
            .await?;

        info!(user_id = %user.id(), "User registered");
        Ok(user)
    }

    /// Verify credentials and mint an access token
    ///
    /// An unknown email and a wrong password fail the same way.
    pub async fn login(&self, request: LoginRequest) -> Result<String, DomainError> {
        request.validate()?;

        let user = match self.repository.get_by_email(&request.email).await? {
            Some(user) if self.hasher.verify(&request.password, user.password_hash()) => user,
            _ => return Err(DomainError::unauthenticated("invalid email or password")),
        };

        debug!(user_id = %user.id(), "Issuing access token");
        self.tokens.issue_access(&user)
    }

    /// Get a user by ID
    pub async fn get(&self, id: UserId) -> Result<User, DomainError> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("user {} not found", id)))
    }

    /// Update email and username of the caller's own account
    pub async fn edit(
        &self,
        principal: &Principal,
        id: UserId,
        request: EditUserRequest,
    ) -> Result<User, DomainError> {
        principal.ensure_owns(id)?;
        request.validate()?;

        let mut user = self.get(id).await?;

        if self.repository.email_taken(&request.email, Some(id)).await? {
            return Err(DomainError::conflict(format!(
                "email {} already registered",
                request.email
            )));
        }

        user.set_profile(request.email, request.username);
        let user = self.repository.update(&user).await?;

        info!(user_id = %id, "User updated");
        Ok(user)
    }

    /// Soft-delete the caller's own account
    pub async fn delete(
        &self,
        principal: &Principal,
        id: UserId,
    ) -> Result<DeleteOutcome, DomainError> {
        principal.ensure_owns(id)?;

        if self.repository.soft_delete(id).await? {
            info!(user_id = %id, "User deleted");
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::AlreadyAbsent)
        }
    }
}
