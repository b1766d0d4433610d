//! Order routes. All of them require an authenticated user.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use texnomart_auth::CurrentUser;
use texnomart_core::catalog::{monthly_payment, Order, OrderDetail, OrderRequest};
use texnomart_core::storage::RepositoryError;

use crate::{handlers::AppError, state::AppState};

/// Attaches the instalment amount derived from the ordered product's price.
async fn with_monthly_payment(state: &AppState, order: Order) -> Result<OrderDetail, AppError> {
    let product = match order.product_id {
        Some(product_id) => state.products.get_product(product_id).await?,
        None => None,
    };

    Ok(OrderDetail {
        monthly_payment: product.map(|p| monthly_payment(p.price, order.month)),
        order,
    })
}

/// List orders (GET /texnomart/orders).
pub async fn list_orders(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<OrderDetail>>, AppError> {
    let orders = state.orders.list_orders().await?;

    let mut details = Vec::with_capacity(orders.len());
    for order in orders {
        details.push(with_monthly_payment(&state, order).await?);
    }
    Ok(Json(details))
}

/// Place an order (POST /texnomart/orders).
///
/// The order belongs to the caller unless the body names another user.
pub async fn create_order(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(mut payload): Json<OrderRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.user_id.is_none() {
        payload.user_id = Some(user.id);
    }
    let order = state
        .orders
        .create_order(&payload.into_new(Utc::now())?)
        .await?;

    tracing::info!(order_id = order.id, user_id = ?order.user_id, "Created order");

    Ok((
        StatusCode::CREATED,
        Json(with_monthly_payment(&state, order).await?),
    ))
}

/// Get an order by ID (GET /texnomart/orders/{id}).
pub async fn get_order(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<OrderDetail>, AppError> {
    let order = state
        .orders
        .get_order(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Order", id))?;
    Ok(Json(with_monthly_payment(&state, order).await?))
}

/// Replace an order (PUT /texnomart/orders/{id}).
pub async fn update_order(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<OrderRequest>,
) -> Result<Json<OrderDetail>, AppError> {
    let mut order = state
        .orders
        .get_order(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Order", id))?;

    payload.apply_to(&mut order, Utc::now())?;
    state.orders.update_order(&order).await?;

    Ok(Json(with_monthly_payment(&state, order).await?))
}

/// Cancel an order (DELETE /texnomart/orders/{id}).
pub async fn delete_order(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.orders.delete_order(id).await?;

    tracing::info!(order_id = id, "Deleted order");

    Ok(StatusCode::NO_CONTENT)
}
