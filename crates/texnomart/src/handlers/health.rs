//! Health check endpoints for Kubernetes-style probes.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/healthz` - Configured storage and cache backends

use axum::{http::StatusCode, Json};
use serde::Serialize;

use crate::state::{CACHE_BACKEND, STORAGE_BACKEND};

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub storage: &'static str,
    pub cache: &'static str,
}

/// GET /livez - Basic liveness probe.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /healthz - Reports which backends this binary was built with.
#[axum::debug_handler]
pub async fn healthz() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        storage: STORAGE_BACKEND,
        cache: CACHE_BACKEND,
    })
}
