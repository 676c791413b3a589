//! API error type and its JSON body

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::DomainError;

/// Error body: `{"message": ..., "errors": [...]}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ErrorResponse,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ErrorResponse {
                message: message.into(),
                errors: Vec::new(),
            },
        }
    }

    /// Attach per-field details
    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.response.errors = errors;
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// 401 from an authentication gate, with the reasons listed in `errors`
    pub fn auth_rejected(reasons: &[&str]) -> Self {
        Self::unauthorized("unauthorized")
            .with_errors(reasons.iter().map(|reason| reason.to_string()).collect())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { message } => Self::not_found(message),
            DomainError::Validation { message, details } => {
                Self::bad_request(message).with_errors(details)
            }
            DomainError::Conflict { message } => Self::bad_request(message),
            // Ownership failures share the 401 status of bad credentials.
            DomainError::Unauthenticated { message }
            | DomainError::InvalidToken { message }
            | DomainError::Forbidden { message } => Self::unauthorized(message),
            DomainError::Storage { message } | DomainError::Internal { message } => {
                error!(%message, "Request failed");
                Self::internal("internal server error")
            }
        }
    }
}
