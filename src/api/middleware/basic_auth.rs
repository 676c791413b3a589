//! HTTP Basic check for the public token endpoint

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap};
use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine as _;
use tracing::warn;

use crate::api::state::AppState;
use crate::api::types::ApiError;

/// The single static username/password pair accepted on `/public`
#[derive(Clone)]
pub struct PublicCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for PublicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicCredentials")
            .field("username", &self.username)
            .field("password", &"[hidden]")
            .finish()
    }
}

/// Marker: the request may obtain a public token
#[derive(Debug)]
pub struct PublicAccess;

/// Check `Authorization: Basic <base64(user:pass)>` against the configured pair
pub fn verify_basic_auth(headers: &HeaderMap, expected: &PublicCredentials) -> Result<(), ApiError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::auth_rejected(&["invalid token"]))?;

    let (scheme, encoded) = value
        .trim()
        .split_once(' ')
        .ok_or_else(|| ApiError::auth_rejected(&["invalid token"]))?;

    if scheme != "Basic" {
        return Err(ApiError::auth_rejected(&["invalid authorization method"]));
    }

    let decoded = B64
        .decode(encoded.trim())
        .map_err(|_| ApiError::auth_rejected(&["invalid token", "failed to decode"]))?;

    let bad_pair = || ApiError::auth_rejected(&["invalid username or password"]);
    let creds = std::str::from_utf8(&decoded).map_err(|_| bad_pair())?;
    let (username, password) = creds.split_once(':').ok_or_else(bad_pair)?;

    if username != expected.username || password != expected.password {
        return Err(bad_pair());
    }

    Ok(())
}

impl FromRequestParts<AppState> for PublicAccess {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(expected) = &state.public_credentials {
            verify_basic_auth(&parts.headers, expected).inspect_err(|_| {
                warn!("Rejected basic credentials on public endpoint");
            })?;
        }

        Ok(PublicAccess)
    }
}
