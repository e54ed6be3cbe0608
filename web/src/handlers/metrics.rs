//! Prometheus scrape endpoint.
//!
//! - GET /metrics - text exposition of every recorded storefront metric

use crate::WebResult;
use crate::error::AppError;
use crate::state::AppState;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

/// Render the Prometheus text exposition.
///
/// 404 when the server was started without a recorder.
pub async fn render_metrics(State(state): State<AppState>) -> WebResult<impl IntoResponse> {
    let handle = state
        .metrics
        .as_ref()
        .ok_or_else(|| AppError::not_found("metrics recorder not installed"))?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    ))
}
