//! Attribute keys, attribute values and the links tying them to products.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use texnomart_core::catalog::{
    AttributeKey, AttributeKeyRequest, AttributeValue, AttributeValueRequest, ProductAttribute,
    ProductAttributeRequest,
};
use texnomart_core::storage::RepositoryError;

use crate::{handlers::AppError, state::AppState};

// ---------------------------------------------------------------------------
// Attribute keys
// ---------------------------------------------------------------------------

/// GET /texnomart/attribute-keys
pub async fn list_attribute_keys(
    State(state): State<AppState>,
) -> Result<Json<Vec<AttributeKey>>, AppError> {
    Ok(Json(state.attribute_keys.list_attribute_keys().await?))
}

/// POST /texnomart/attribute-keys
pub async fn create_attribute_key(
    State(state): State<AppState>,
    Json(payload): Json<AttributeKeyRequest>,
) -> Result<impl IntoResponse, AppError> {
    let key = state
        .attribute_keys
        .create_attribute_key(&payload.into_new())
        .await?;
    Ok((StatusCode::CREATED, Json(key)))
}

/// GET /texnomart/attribute-keys/{id}
pub async fn get_attribute_key(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AttributeKey>, AppError> {
    let key = state
        .attribute_keys
        .get_attribute_key(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("AttributeKey", id))?;
    Ok(Json(key))
}

/// PUT /texnomart/attribute-keys/{id}
pub async fn update_attribute_key(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<AttributeKeyRequest>,
) -> Result<Json<AttributeKey>, AppError> {
    let mut key = state
        .attribute_keys
        .get_attribute_key(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("AttributeKey", id))?;

    payload.apply_to(&mut key);
    state.attribute_keys.update_attribute_key(&key).await?;

    Ok(Json(key))
}

/// DELETE /texnomart/attribute-keys/{id}
pub async fn delete_attribute_key(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.attribute_keys.delete_attribute_key(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Attribute values
// ---------------------------------------------------------------------------

/// GET /texnomart/attribute-values
pub async fn list_attribute_values(
    State(state): State<AppState>,
) -> Result<Json<Vec<AttributeValue>>, AppError> {
    Ok(Json(state.attribute_values.list_attribute_values().await?))
}

/// POST /texnomart/attribute-values
pub async fn create_attribute_value(
    State(state): State<AppState>,
    Json(payload): Json<AttributeValueRequest>,
) -> Result<impl IntoResponse, AppError> {
    let value = state
        .attribute_values
        .create_attribute_value(&payload.into_new(Utc::now()))
        .await?;
    Ok((StatusCode::CREATED, Json(value)))
}

/// GET /texnomart/attribute-values/{id}
pub async fn get_attribute_value(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AttributeValue>, AppError> {
    let value = state
        .attribute_values
        .get_attribute_value(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("AttributeValue", id))?;
    Ok(Json(value))
}

/// PUT /texnomart/attribute-values/{id}
pub async fn update_attribute_value(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<AttributeValueRequest>,
) -> Result<Json<AttributeValue>, AppError> {
    let mut value = state
        .attribute_values
        .get_attribute_value(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("AttributeValue", id))?;

    payload.apply_to(&mut value, Utc::now());
    state.attribute_values.update_attribute_value(&value).await?;

    Ok(Json(value))
}

/// DELETE /texnomart/attribute-values/{id}
pub async fn delete_attribute_value(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.attribute_values.delete_attribute_value(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Product attributes
// ---------------------------------------------------------------------------

/// GET /texnomart/product-attributes
pub async fn list_product_attributes(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductAttribute>>, AppError> {
    Ok(Json(state.product_attributes.list_product_attributes().await?))
}

/// POST /texnomart/product-attributes
pub async fn create_product_attribute(
    State(state): State<AppState>,
    Json(payload): Json<ProductAttributeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let attribute = state
        .product_attributes
        .create_product_attribute(&payload.into_new())
        .await?;
    Ok((StatusCode::CREATED, Json(attribute)))
}

/// GET /texnomart/product-attributes/{id}
pub async fn get_product_attribute(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProductAttribute>, AppError> {
    let attribute = state
        .product_attributes
        .get_product_attribute(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("ProductAttribute", id))?;
    Ok(Json(attribute))
}

/// PUT /texnomart/product-attributes/{id}
pub async fn update_product_attribute(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductAttributeRequest>,
) -> Result<Json<ProductAttribute>, AppError> {
    let mut attribute = state
        .product_attributes
        .get_product_attribute(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("ProductAttribute", id))?;

    payload.apply_to(&mut attribute);
    state
        .product_attributes
        .update_product_attribute(&attribute)
        .await?;

    Ok(Json(attribute))
}

/// DELETE /texnomart/product-attributes/{id}
pub async fn delete_product_attribute(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.product_attributes.delete_product_attribute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
