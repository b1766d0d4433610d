use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use texnomart_core::catalog::{
    filter_categories, filter_products, with_primary_images, Category, CategoryRequest,
    ListCategoriesQuery, ListProductsQuery, ProductDetail,
};
use texnomart_core::storage::RepositoryError;

use crate::{handlers::AppError, state::AppState};

/// List categories (GET /texnomart/categories).
///
/// The unfiltered list comes from the cache; filters apply on top of it.
pub async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<ListCategoriesQuery>,
) -> Result<Json<Vec<Category>>, AppError> {
    let categories = state.categories.list_categories().await?;
    Ok(Json(filter_categories(&categories, &query)))
}

/// Create a category (POST /texnomart/categories).
pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CategoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new_category = payload.into_new(Utc::now())?;
    let category = state.categories.create_category(&new_category).await?;

    tracing::info!(category_id = category.id, title = %category.title, "Created category");

    Ok((StatusCode::CREATED, Json(category)))
}

/// Get a category by ID (GET /texnomart/categories/{id}).
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Category>, AppError> {
    let category = state
        .categories
        .get_category(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Category", id))?;
    Ok(Json(category))
}

/// Replace a category (PUT /texnomart/categories/{id}).
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryRequest>,
) -> Result<Json<Category>, AppError> {
    let mut category = state
        .categories
        .get_category(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Category", id))?;

    payload.apply_to(&mut category, Utc::now())?;
    state.categories.update_category(&category).await?;

    tracing::info!(category_id = id, "Updated category");

    Ok(Json(category))
}

/// Delete a category and its products (DELETE /texnomart/categories/{id}).
///
/// Every removed row is archived first; an archive failure keeps them all.
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.categories.delete_category(id).await?;

    tracing::info!(category_id = id, "Deleted category");

    Ok(StatusCode::NO_CONTENT)
}

/// Products of one category with their primary image
/// (GET /texnomart/category/{slug}/products).
pub async fn list_category_products(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<ListProductsQuery>,
) -> Result<Json<Vec<ProductDetail>>, AppError> {
    let category = state
        .categories
        .get_category_by_slug(&slug)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Category", &slug))?;

    let products = state.products.list_products_by_category(category.id).await?;
    let query = ListProductsQuery {
        category: None,
        ..query
    };
    let products = filter_products(&products, &query);
    let images = state.images.list_images().await?;

    Ok(Json(
        with_primary_images(products, &images)
            .into_iter()
            .map(ProductDetail::from)
            .collect(),
    ))
}
