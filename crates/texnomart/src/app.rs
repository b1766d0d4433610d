use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        attributes::{
            create_attribute_key, create_attribute_value, create_product_attribute,
            delete_attribute_key, delete_attribute_value, delete_product_attribute,
            get_attribute_key, get_attribute_value, get_product_attribute, list_attribute_keys,
            list_attribute_values, list_product_attributes, update_attribute_key,
            update_attribute_value, update_product_attribute,
        },
        categories::{
            create_category, delete_category, get_category, list_categories,
            list_category_products, update_category,
        },
        comments::{create_comment, delete_comment, get_comment, list_comments, update_comment},
        health::{healthz, livez},
        images::{create_image, delete_image, get_image, list_images, update_image},
        orders::{create_order, delete_order, get_order, list_orders, update_order},
        products::{create_product, delete_product, get_product, list_products, update_product},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let catalog_routes = Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
        .route("/category/{slug}/products", get(list_category_products))
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/images", get(list_images).post(create_image))
        .route(
            "/images/{id}",
            get(get_image).put(update_image).delete(delete_image),
        )
        .route("/orders", get(list_orders).post(create_order))
        .route(
            "/orders/{id}",
            get(get_order).put(update_order).delete(delete_order),
        )
        .route("/comments", get(list_comments).post(create_comment))
        .route(
            "/comments/{id}",
            get(get_comment).put(update_comment).delete(delete_comment),
        )
        .route(
            "/attribute-keys",
            get(list_attribute_keys).post(create_attribute_key),
        )
        .route(
            "/attribute-keys/{id}",
            get(get_attribute_key)
                .put(update_attribute_key)
                .delete(delete_attribute_key),
        )
        .route(
            "/attribute-values",
            get(list_attribute_values).post(create_attribute_value),
        )
        .route(
            "/attribute-values/{id}",
            get(get_attribute_value)
                .put(update_attribute_value)
                .delete(delete_attribute_value),
        )
        .route(
            "/product-attributes",
            get(list_product_attributes).post(create_product_attribute),
        )
        .route(
            "/product-attributes/{id}",
            get(get_product_attribute)
                .put(update_product_attribute)
                .delete(delete_product_attribute),
        );

    let auth_routes = texnomart_auth::auth_routes().with_state(state.auth.clone());

    Router::new()
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .nest("/texnomart", catalog_routes)
        .with_state(state)
        .merge(auth_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
}
