//! Application state for Axum handlers.

use crate::metrics::PrometheusHandle;
use std::sync::Arc;
use storefront_core::{CollectionStore, StorefrontService};

/// Application state shared across all HTTP handlers.
///
/// Cheap to clone: the service holds an `Arc` to the store and the metrics
/// handle is itself shared.
#[derive(Clone)]
pub struct AppState {
    /// Storefront read operations
    pub service: StorefrontService,
    /// Prometheus handle backing `GET /metrics`, if a recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create state around an already configured service.
    #[must_use]
    pub const fn new(service: StorefrontService) -> Self {
        Self {
            service,
            metrics: None,
        }
    }

    /// Create state with default listing settings over `store`.
    #[must_use]
    pub fn from_store(store: Arc<dyn CollectionStore>) -> Self {
        Self::new(StorefrontService::new(store))
    }

    /// Serve `GET /metrics` from `handle`.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service", &self.service)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}
