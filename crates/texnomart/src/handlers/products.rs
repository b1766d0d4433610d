use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use texnomart_core::catalog::{filter_products, ListProductsQuery, ProductDetail, ProductRequest};
use texnomart_core::storage::RepositoryError;

use crate::{handlers::AppError, state::AppState};

/// List products (GET /texnomart/products).
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> Result<Json<Vec<ProductDetail>>, AppError> {
    let products = state.products.list_products().await?;
    Ok(Json(
        filter_products(&products, &query)
            .into_iter()
            .map(ProductDetail::from)
            .collect(),
    ))
}

/// Create a product (POST /texnomart/products).
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<ProductRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new_product = payload.into_new(Utc::now())?;
    let product = state.products.create_product(&new_product).await?;

    tracing::info!(product_id = product.id, slug = %product.slug, "Created product");

    Ok((StatusCode::CREATED, Json(ProductDetail::from(product))))
}

/// Get a product by ID (GET /texnomart/products/{id}).
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProductDetail>, AppError> {
    let product = state
        .products
        .get_product(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Product", id))?;
    Ok(Json(product.into()))
}

/// Replace a product (PUT /texnomart/products/{id}).
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductRequest>,
) -> Result<Json<ProductDetail>, AppError> {
    let mut product = state
        .products
        .get_product(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Product", id))?;

    payload.apply_to(&mut product, Utc::now())?;
    state.products.update_product(&product).await?;

    tracing::info!(product_id = id, "Updated product");

    Ok(Json(product.into()))
}

/// Delete a product (DELETE /texnomart/products/{id}).
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.products.delete_product(id).await?;

    tracing::info!(product_id = id, "Deleted product");

    Ok(StatusCode::NO_CONTENT)
}
