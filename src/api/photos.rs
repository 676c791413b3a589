//! Photo endpoints

use axum::{
    extract::State,
    http::StatusCode,
    routing::{post, put},
    Router,
};
use serde::Deserialize;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, MessageResponse, Path, Query};
use crate::domain::{Photo, PhotoContent, PhotoId, PhotoWithOwner, UserId};

pub fn create_photos_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_photo).get(list_photos))
        .route("/{id}", put(update_photo).delete(delete_photo))
}

#[derive(Debug, Deserialize)]
pub struct UserFilter {
    pub user_id: i64,
}

/// POST /photos
pub async fn create_photo(
    RequireUser(principal): RequireUser,
    State(state): State<AppState>,
    Json(content): Json<PhotoContent>,
) -> Result<(StatusCode, Json<Photo>), ApiError> {
    let photo = state.photo_service.create(&principal, content).await?;
    Ok((StatusCode::CREATED, Json(photo)))
}

/// GET /photos?user_id=
pub async fn list_photos(
    RequireUser(_principal): RequireUser,
    State(state): State<AppState>,
    Query(filter): Query<UserFilter>,
) -> Result<Json<Vec<PhotoWithOwner>>, ApiError> {
    let photos = state
        .photo_service
        .list_by_user(UserId::new(filter.user_id))
        .await?;
    Ok(Json(photos))
}

/// PUT /photos/{id}
pub async fn update_photo(
    RequireUser(principal): RequireUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(content): Json<PhotoContent>,
) -> Result<Json<Photo>, ApiError> {
    let photo = state
        .photo_service
        .update(&principal, PhotoId::new(id), content)
        .await?;
    Ok(Json(photo))
}

/// DELETE /photos/{id}
pub async fn delete_photo(
    RequireUser(principal): RequireUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .photo_service
        .delete(&principal, PhotoId::new(id))
        .await?;

    Ok(Json(MessageResponse::new(
        "Your photo has been successfully deleted",
    )))
}
