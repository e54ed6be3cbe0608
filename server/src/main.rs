//! Storefront server
//!
//! Serves the purchase ledger and catalog listing over HTTP.
//!
//! # Usage
//!
//! ```bash
//! # In-memory store seeded from a JSON document
//! STOREFRONT_SEED_PATH=server/seed.json cargo run --bin storefront
//!
//! # PostgreSQL documents table
//! STOREFRONT_BACKEND=postgres DATABASE_URL=postgres://... cargo run --bin storefront
//! ```

use storefront_server::{Config, app, open_store};
use storefront_web::metrics::install_recorder;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,storefront=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        backend = ?config.store.backend,
        category = %config.catalog.category,
        page_size = config.catalog.page_size.get(),
        "Configuration loaded"
    );

    let metrics = install_recorder()?;
    let store = open_store(&config.store).await?;
    let app = app(store, &config.catalog, Some(metrics));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(%address, "Storefront listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "Failed to listen for shutdown signal");
    }
}
