//! Liveness and readiness.
//!
//! - GET /health - process is up, never touches the store
//! - GET /health/ready - the store answers a products fetch

use crate::WebResult;
use crate::state::AppState;
use axum::{Json, extract::State};
use serde::Serialize;

/// Liveness: answers `"ok"` as long as the router is serving.
#[allow(clippy::unused_async)]
pub async fn health_check() -> &'static str {
    "ok"
}

/// Readiness report.
#[derive(Debug, Serialize)]
pub struct Readiness {
    /// Always `"ready"` on success
    pub status: &'static str,
    /// Store backend in use
    pub backend: &'static str,
    /// Product documents currently in the store
    pub products: usize,
}

/// Readiness: one products fetch against the configured store.
///
/// 503 with code `SERVICE_UNAVAILABLE` when the fetch fails or times out.
pub async fn readiness(State(state): State<AppState>) -> WebResult<Json<Readiness>> {
    let products = state.service.probe().await?;
    Ok(Json(Readiness {
        status: "ready",
        backend: state.service.backend(),
        products,
    }))
}
