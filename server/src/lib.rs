//! Storefront server wiring.
//!
//! Turns a [`Config`] into a running application: picks the backing store,
//! applies catalog defaults to the service and builds the HTTP router.

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;

pub use config::{Backend, CatalogConfig, Config, ConfigError, ServerConfig, StoreConfig};

use anyhow::Context;
use axum::Router;
use std::sync::Arc;
use storefront_core::{CollectionStore, StorefrontService};
use storefront_postgres::PostgresCollectionStore;
use storefront_testing::InMemoryCollectionStore;
use storefront_web::metrics::PrometheusHandle;
use storefront_web::{AppState, router};

/// Open the store selected by `config`.
///
/// The memory backend loads its seed file when one is configured and starts
/// empty otherwise. The postgres backend connects and runs migrations.
///
/// # Errors
///
/// Returns an error if the seed file cannot be loaded, the database is
/// unreachable, or migrations fail.
pub async fn open_store(config: &StoreConfig) -> anyhow::Result<Arc<dyn CollectionStore>> {
    match config.backend {
        Backend::Memory => {
            let store = match &config.seed_path {
                Some(path) => InMemoryCollectionStore::from_seed_file(path)
                    .with_context(|| format!("loading seed file {}", path.display()))?,
                None => {
                    tracing::warn!("No STOREFRONT_SEED_PATH set, serving an empty store");
                    InMemoryCollectionStore::new()
                }
            };
            Ok(Arc::new(store))
        }
        Backend::Postgres => {
            let store = PostgresCollectionStore::connect(
                &config.database_url,
                config.max_connections,
                config.fetch_timeout,
            )
            .await
            .context("connecting to postgres")?;
            store.migrate().await.context("running migrations")?;
            Ok(Arc::new(store))
        }
    }
}

/// Build the service with the configured catalog defaults.
#[must_use]
pub fn service(store: Arc<dyn CollectionStore>, config: &CatalogConfig) -> StorefrontService {
    StorefrontService::new(store)
        .with_category(config.category.clone())
        .with_page_size(config.page_size)
}

/// Build the full HTTP application. `GET /metrics` is served from `metrics`
/// when a recorder handle is given.
#[must_use]
pub fn app(
    store: Arc<dyn CollectionStore>,
    config: &CatalogConfig,
    metrics: Option<PrometheusHandle>,
) -> Router {
    let state = AppState::new(service(store, config));
    router(match metrics {
        Some(handle) => state.with_metrics(handle),
        None => state,
    })
}
