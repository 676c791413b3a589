//! Anonymous token endpoint

use axum::{extract::State, routing::get, Router};
use tracing::debug;

use crate::api::middleware::PublicAccess;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, TokenResponse};

pub fn create_public_router() -> Router<AppState> {
    Router::new().route("/", get(public_token))
}

/// GET /public
///
/// Issues a public token. Guarded by basic credentials when configured.
pub async fn public_token(
    _access: PublicAccess,
    State(state): State<AppState>,
) -> Result<Json<TokenResponse>, ApiError> {
    debug!("Issuing public token");

    let token = state.tokens.issue_public()?;
    Ok(Json(TokenResponse { token }))
}
