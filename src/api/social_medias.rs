//! Social media endpoints

use axum::{
    extract::State,
    http::StatusCode,
    routing::{post, put},
    Router,
};

use crate::api::middleware::RequireUser;
use crate::api::photos::UserFilter;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, MessageResponse, Path, Query};
use crate::domain::{SocialMedia, SocialMediaContent, SocialMediaId, SocialMediaWithOwner, UserId};

pub fn create_social_medias_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_social_media).get(list_social_medias))
        .route("/{id}", put(update_social_media).delete(delete_social_media))
}

/// POST /socialmedias
pub async fn create_social_media(
    RequireUser(principal): RequireUser,
    State(state): State<AppState>,
    Json(content): Json<SocialMediaContent>,
) -> Result<(StatusCode, Json<SocialMedia>), ApiError> {
    let link = state
        .social_media_service
        .create(&principal, content)
        .await?;
    Ok((StatusCode::CREATED, Json(link)))
}

/// GET /socialmedias?user_id=
pub async fn list_social_medias(
    RequireUser(_principal): RequireUser,
    State(state): State<AppState>,
    Query(filter): Query<UserFilter>,
) -> Result<Json<Vec<SocialMediaWithOwner>>, ApiError> {
    let links = state
        .social_media_service
        .list_by_user(UserId::new(filter.user_id))
        .await?;
    Ok(Json(links))
}

/// PUT /socialmedias/{id}
pub async fn update_social_media(
    RequireUser(principal): RequireUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(content): Json<SocialMediaContent>,
) -> Result<Json<SocialMedia>, ApiError> {
    let link = state
        .social_media_service
        .update(&principal, SocialMediaId::new(id), content)
        .await?;
    Ok(Json(link))
}

/// DELETE /socialmedias/{id}
pub async fn delete_social_media(
    RequireUser(principal): RequireUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .social_media_service
        .delete(&principal, SocialMediaId::new(id))
        .await?;

    Ok(Json(MessageResponse::new(
        "Your social media has been successfully deleted",
    )))
}
