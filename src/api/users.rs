//! User endpoints: registration, login and profile management

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tracing::debug;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, MessageResponse, Path, TokenResponse};
use crate::domain::{User, UserId};
use crate::infrastructure::user::{EditUserRequest, LoginRequest, SignUpRequest};

pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/{id}", get(get_user).put(edit_user).delete(delete_user))
}

/// POST /users/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    debug!(email = %request.email, "Registering user");

    let user = state.user_service.sign_up(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /users/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = state.user_service.login(request).await?;
    Ok(Json(TokenResponse { token }))
}

/// GET /users/{id}
pub async fn get_user(
    RequireUser(_principal): RequireUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<User>, ApiError> {
    let user = state.user_service.get(UserId::new(id)).await?;
    Ok(Json(user))
}

/// PUT /users/{id}
pub async fn edit_user(
    RequireUser(principal): RequireUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<EditUserRequest>,
) -> Result<Json<User>, ApiError> {
    debug!(user_id = id, "Editing user");

    let user = state
        .user_service
        .edit(&principal, UserId::new(id), request)
        .await?;
    Ok(Json(user))
}

/// DELETE /users/{id}
pub async fn delete_user(
    RequireUser(principal): RequireUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .user_service
        .delete(&principal, UserId::new(id))
        .await?;

    Ok(Json(MessageResponse::new(
        "Your account has been successfully deleted",
    )))
}
