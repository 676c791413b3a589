use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        details: Vec<String>,
    },

    #[error("Unauthenticated: {message}")]
    Unauthenticated { message: String },

    #[error("Invalid token: {message}")]
    InvalidToken { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// Validation failure listing each offending field
    pub fn validation_with_details(message: impl Into<String>, details: Vec<String>) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated {
            message: message.into(),
        }
    }

    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::InvalidToken {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// The message without the variant prefix, suitable for API responses
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound { message }
            | Self::Validation { message, .. }
            | Self::Unauthenticated { message }
            | Self::InvalidToken { message }
            | Self::Forbidden { message }
            | Self::Conflict { message }
            | Self::Storage { message }
            | Self::Internal { message } => message,
        }
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("{} is invalid ({})", field, e.code),
                })
            })
            .collect();
        details.sort();

        Self::validation_with_details("invalid request", details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("photo 7 not found");
        assert_eq!(error.to_string(), "Not found: photo 7 not found");
        assert_eq!(error.message(), "photo 7 not found");
    }

    #[test]
    fn test_validation_error() {
        let error = DomainError::validation("password less than 6 characters");
        assert_eq!(
            error.to_string(),
            "Validation error: password less than 6 characters"
        );
    }

    #[test]
    fn test_validator_errors_become_details() {
        use validator::Validate;

        #[derive(Validate)]
        struct Body {
            #[validate(length(min = 1, message = "title is required"))]
            title: String,
            #[validate(email)]
            email: String,
        }

        let body = Body {
            title: String::new(),
            email: "not-an-email".to_string(),
        };
        let error = DomainError::from(body.validate().unwrap_err());

        match error {
            DomainError::Validation { message, details } => {
                assert_eq!(message, "invalid request");
                assert_eq!(details.len(), 2);
                assert!(details.contains(&"title is required".to_string()));
                assert!(details.iter().any(|d| d.starts_with("email is invalid")));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_forbidden_error() {
        let error = DomainError::forbidden("invalid user request");
        assert_eq!(error.to_string(), "Forbidden: invalid user request");
    }

    #[test]
    fn test_conflict_error() {
        let error = DomainError::conflict("email already in use");
        assert_eq!(error.to_string(), "Conflict: email already in use");
    }
}
