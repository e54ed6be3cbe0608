//! HTTP routes.

use crate::handlers::{get_catalog, health_check, list_purchases, readiness, render_metrics};
use crate::state::AppState;
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

/// Build the storefront router.
///
/// # Routes
///
/// - `GET /health` - Liveness
/// - `GET /health/ready` - Readiness (one store fetch)
/// - `GET /api/users/:user_id/purchases` - Purchase ledger
/// - `GET /api/catalog` - Category listing
/// - `GET /metrics` - Prometheus scrape (404 without a recorder)
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness))
        .route("/api/users/:user_id/purchases", get(list_purchases))
        .route("/api/catalog", get(get_catalog))
        .route("/metrics", get(render_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
