//! Health check endpoints for Kubernetes-style probes.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/healthz` - Static service info (no backend calls)
//! - `/readyz` - Readiness probe (pings storage and the image store)

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ReadinessStatus {
    pub healthy: bool,
    pub storage: String,
    pub uploads: String,
}

/// GET /livez - Basic liveness probe.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /healthz - Service info without touching any backend.
#[axum::debug_handler]
pub async fn healthz(State(state): State<AppState>) -> Response {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uploads": state.images.name(),
    }))
    .into_response()
}

/// GET /readyz - Readiness probe.
///
/// Returns 200 when both storage and the image store respond, 503 otherwise.
#[axum::debug_handler]
pub async fn readyz(State(state): State<AppState>) -> Response {
    let (storage, uploads) = tokio::join!(state.blogs.ping(), state.images.check());

    let status = ReadinessStatus {
        healthy: storage.is_ok() && uploads.is_ok(),
        storage: storage.map_or_else(|e| e.to_string(), |()| "ok".to_string()),
        uploads: uploads.map_or_else(|e| e.to_string(), |()| "ok".to_string()),
    };

    if status.healthy {
        (StatusCode::OK, Json(status)).into_response()
    } else {
        tracing::warn!(storage = %status.storage, uploads = %status.uploads, "Not ready");
        (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response()
    }
}
