//! Request extractors and the JSON error shape shared by every endpoint

pub mod error;
pub mod extract;
pub mod json;

pub use error::{ApiError, ErrorResponse};
pub use extract::{Path, Query};
pub use json::Json;

use serde::Serialize;

/// Body returned by operations that have nothing else to report
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body carrying a freshly minted token
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
}
