use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use texnomart_auth::OptionalUser;
use texnomart_core::catalog::{Comment, CommentRequest};
use texnomart_core::storage::RepositoryError;

use crate::{handlers::AppError, state::AppState};

/// List comments (GET /texnomart/comments).
pub async fn list_comments(State(state): State<AppState>) -> Result<Json<Vec<Comment>>, AppError> {
    Ok(Json(state.comments.list_comments().await?))
}

/// Post a comment (POST /texnomart/comments).
///
/// Anonymous comments are allowed; a signed-in author is recorded when the
/// body does not name one.
pub async fn create_comment(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
    Json(mut payload): Json<CommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.user_id.is_none() {
        payload.user_id = user.map(|u| u.id);
    }
    let comment = state
        .comments
        .create_comment(&payload.into_new(Utc::now())?)
        .await?;

    tracing::info!(comment_id = comment.id, product_id = comment.product_id, "Created comment");

    Ok((StatusCode::CREATED, Json(comment)))
}

/// Get a comment by ID (GET /texnomart/comments/{id}).
pub async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Comment>, AppError> {
    let comment = state
        .comments
        .get_comment(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Comment", id))?;
    Ok(Json(comment))
}

/// Replace a comment (PUT /texnomart/comments/{id}).
pub async fn update_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<CommentRequest>,
) -> Result<Json<Comment>, AppError> {
    let mut comment = state
        .comments
        .get_comment(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Comment", id))?;

    payload.apply_to(&mut comment, Utc::now())?;
    state.comments.update_comment(&comment).await?;

    Ok(Json(comment))
}

/// Delete a comment (DELETE /texnomart/comments/{id}).
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.comments.delete_comment(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
