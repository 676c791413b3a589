//! User infrastructure module
//!
//! Password hashing with Argon2, the PostgreSQL repository, and the user
//! service that handles sign-up, login and profile management.

mod password;
mod postgres_repository;
mod service;

pub use password::{Argon2Hasher, PasswordCost, PasswordHasher};
pub use postgres_repository::PostgresUserRepository;
pub use service::{EditUserRequest, LoginRequest, SignUpRequest, UserService};
