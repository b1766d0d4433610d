//! Product image routes. All of them require an authenticated user.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use texnomart_auth::CurrentUser;
use texnomart_core::catalog::{Image, ImageRequest};
use texnomart_core::storage::RepositoryError;

use crate::{handlers::AppError, state::AppState};

/// List images (GET /texnomart/images).
pub async fn list_images(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<Image>>, AppError> {
    Ok(Json(state.images.list_images().await?))
}

/// Upload an image record (POST /texnomart/images).
pub async fn create_image(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<ImageRequest>,
) -> Result<impl IntoResponse, AppError> {
    let image = state
        .images
        .create_image(&payload.into_new(Utc::now())?)
        .await?;

    tracing::info!(image_id = image.id, product_id = image.product_id, user = %user.username, "Created image");

    Ok((StatusCode::CREATED, Json(image)))
}

/// Get an image by ID (GET /texnomart/images/{id}).
pub async fn get_image(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Image>, AppError> {
    let image = state
        .images
        .get_image(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Image", id))?;
    Ok(Json(image))
}

/// Replace an image (PUT /texnomart/images/{id}).
pub async fn update_image(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<ImageRequest>,
) -> Result<Json<Image>, AppError> {
    let mut image = state
        .images
        .get_image(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Image", id))?;

    payload.apply_to(&mut image, Utc::now())?;
    state.images.update_image(&image).await?;

    Ok(Json(image))
}

/// Delete an image (DELETE /texnomart/images/{id}).
pub async fn delete_image(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.images.delete_image(id).await?;

    tracing::info!(image_id = id, "Deleted image");

    Ok(StatusCode::NO_CONTENT)
}
