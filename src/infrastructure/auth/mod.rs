//! Authentication infrastructure module
//!
//! Signed, time-bound tokens for the public and access flows.

mod jwt;

pub use jwt::{Claims, JwtConfig, JwtService, TokenCodec, TokenKind};
