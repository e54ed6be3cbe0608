//! Axum HTTP surface for the storefront.
//!
//! Handlers stay thin: each one extracts its inputs, calls a single
//! [`StorefrontService`](storefront_core::StorefrontService) method and
//! serializes the result. Every request reads at most one fresh snapshot.
//!
//! | route | handler |
//! |-------|---------|
//! | `GET /health` | [`handlers::health_check`] |
//! | `GET /health/ready` | [`handlers::readiness`] |
//! | `GET /api/users/:user_id/purchases` | [`handlers::list_purchases`] |
//! | `GET /api/catalog?category&page` | [`handlers::get_catalog`] |
//! | `GET /metrics` | [`handlers::render_metrics`] |
//!
//! ```ignore
//! let app = storefront_web::router(AppState::from_store(Arc::new(store)));
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod handlers;
pub mod metrics;
pub mod router;
pub mod state;

pub use error::{AppError, ErrorCode};
pub use router::router;
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
