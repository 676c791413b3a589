//! Comment endpoints

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
use crate::domain::{Comment, CommentId, CommentMessage, CommentWithRelations, NewComment, PhotoId};

pub fn create_comments_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_comment).get(list_comments))
        .route("/{id}", put(update_comment).delete(delete_comment))
}

#[derive(Debug, Deserialize)]
pub struct PhotoFilter {
    pub photo_id: i64,
}

/// POST /comments
pub async fn create_comment(
    RequireUser(principal): RequireUser,
    State(state): State<AppState>,
    Json(request): Json<NewComment>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    let comment = state.comment_service.create(&principal, request).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// GET /comments?photo_id=
pub async fn list_comments(
    RequireUser(_principal): RequireUser,
    State(state): State<AppState>,
    Query(filter): Query<PhotoFilter>,
) -> Result<Json<Vec<CommentWithRelations>>, ApiError> {
    let comments = state
        .comment_service
        .list_by_photo(PhotoId::new(filter.photo_id))
        .await?;
    Ok(Json(comments))
}

/// PUT /comments/{id}
pub async fn update_comment(
    RequireUser(principal): RequireUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<CommentMessage>,
) -> Result<Json<Comment>, ApiError> {
    let comment = state
        .comment_service
        .update(&principal, CommentId::new(id), request)
        .await?;
    Ok(Json(comment))
}

/// DELETE /comments/{id}
pub async fn delete_comment(
    RequireUser(principal): RequireUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .comment_service
        .delete(&principal, CommentId::new(id))
        .await?;

    Ok(Json(MessageResponse::new(
        "Your comment has been successfully deleted",
    )))
}
