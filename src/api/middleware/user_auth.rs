//! Bearer-token authentication yielding the caller's principal

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use tracing::{debug, warn};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::Principal;

const INVALID_TOKEN: &str = "invalid token";
const INVALID_METHOD: &str = "invalid authorization method";
const FAILED_TO_DECODE: &str = "failed to decode";
const NOT_ACCESS_TOKEN: &str = "not an access token";

/// Extractor that requires a valid access token
///
/// Reads `Authorization: Bearer <token>`. Verification is stateless; the
/// user record is not looked up.
#[derive(Debug, Clone)]
pub struct RequireUser(pub Principal);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_jwt_token(&parts.headers)?;

        debug!("Validating access token");

        let claims = state.tokens.verify(&token).map_err(|e| {
            warn!(error = %e, "Rejected bearer token");
            ApiError::auth_rejected(&[INVALID_TOKEN, FAILED_TO_DECODE])
        })?;

        let principal = claims.principal().map_err(|e| {
            warn!(error = %e, "Bearer token carries no user");
            ApiError::auth_rejected(&[INVALID_TOKEN, NOT_ACCESS_TOKEN])
        })?;

        Ok(RequireUser(principal))
    }
}

/// Extract the bearer token from the Authorization header
///
/// A missing header or token gives "invalid token"; any scheme other than
/// `Bearer` gives "invalid authorization method".
pub fn extract_jwt_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::auth_rejected(&[INVALID_TOKEN]))?;

    let (scheme, token) = value
        .trim()
        .split_once(' ')
        .ok_or_else(|| ApiError::auth_rejected(&[INVALID_TOKEN]))?;

    if scheme != "Bearer" {
        return Err(ApiError::auth_rejected(&[INVALID_METHOD]));
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(ApiError::auth_rejected(&[INVALID_TOKEN]));
    }

    Ok(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            "Bearer eyJhbGciOiJIUzI1NiJ9.test".parse().unwrap(),
        );

        assert_eq!(
            extract_jwt_token(&headers).unwrap(),
            "eyJhbGciOiJIUzI1NiJ9.test"
        );
    }

    #[test]
    fn test_missing_token() {
        let headers = HeaderMap::new();

        let err = extract_jwt_token(&headers).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_invalid_auth_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Basic dXNlcjpwYXNz".parse().unwrap());

        let err = extract_jwt_token(&headers).unwrap_err();
        assert_eq!(err.response.message, "unauthorized");
        assert_eq!(err.response.errors, vec!["invalid authorization method"]);
    }

    #[test]
    fn test_missing_token_reason() {
        let err = extract_jwt_token(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.response.errors, vec!["invalid token"]);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer".parse().unwrap());
        let err = extract_jwt_token(&headers).unwrap_err();
        assert_eq!(err.response.errors, vec!["invalid token"]);
    }

    #[test]
    fn test_empty_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer   ".parse().unwrap());

        assert!(extract_jwt_token(&headers).is_err());
    }

    #[test]
    fn test_trimmed_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            "Bearer   token-with-spaces   ".parse().unwrap(),
        );

        assert_eq!(extract_jwt_token(&headers).unwrap(), "token-with-spaces");
    }
}
