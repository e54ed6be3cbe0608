//! `PostgreSQL`-backed collection store.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE documents (
//!     seq BIGSERIAL PRIMARY KEY,
//!     collection TEXT NOT NULL,
//!     key TEXT NOT NULL,
//!     body JSONB NOT NULL,
//!     inserted_at TIMESTAMPTZ NOT NULL DEFAULT now(),
//!     UNIQUE (collection, key)
//! );
//! ```
//!
//! `seq` is the store's key order: snapshots come back `ORDER BY seq`, so
//! orders and products appear in the order they were written.

use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};
use storefront_core::store::{self, CollectionStore, Record, Snapshot, StoreError};

/// Table holding every collection's documents.
pub const DOCUMENTS_TABLE: &str = "documents";

/// Default deadline for a single collection fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// PostgreSQL-backed [`CollectionStore`].
///
/// # Example
///
/// ```ignore
/// use storefront_postgres::PostgresCollectionStore;
///
/// let store = PostgresCollectionStore::connect(
///     "postgres://localhost/storefront",
///     10,
///     Duration::from_secs(5),
/// ).await?;
/// store.migrate().await?;
///
/// let orders = store.fetch_collection("orders").await?;
/// ```
#[derive(Clone, Debug)]
pub struct PostgresCollectionStore {
    pool: PgPool,
    fetch_timeout: Duration,
}

impl PostgresCollectionStore {
    /// Create a store over an existing connection pool.
    #[must_use]
    pub const fn new(pool: PgPool, fetch_timeout: Duration) -> Self {
        Self {
            pool,
            fetch_timeout,
        }
    }

    /// Connect a new pool.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the connection fails.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        fetch_timeout: Duration,
    ) -> store::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(fetch_timeout)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::unavailable(DOCUMENTS_TABLE, format!("Failed to connect: {e}")))?;

        tracing::info!(max_connections, "Connected to document database");
        Ok(Self::new(pool, fetch_timeout))
    }

    /// Create the `documents` table if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the migration fails.
    pub async fn migrate(&self) -> store::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::unavailable(DOCUMENTS_TABLE, format!("Migration failed: {e}")))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Deadline applied to each fetch.
    #[must_use]
    pub const fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }

    #[tracing::instrument(skip(self))]
    async fn fetch(&self, name: &str) -> store::Result<Snapshot> {
        let started = Instant::now();

        let query = sqlx::query_as::<_, (String, Value)>(
            "SELECT key, body FROM documents WHERE collection = $1 ORDER BY seq ASC",
        )
        .bind(name)
        .fetch_all(&self.pool);

        let result = match tokio::time::timeout(self.fetch_timeout, query).await {
            Ok(Ok(rows)) => Ok(rows),
            Ok(Err(e)) => Err(StoreError::unavailable(name, e.to_string())),
            Err(_) => Err(StoreError::Timeout {
                collection: name.to_string(),
                elapsed: self.fetch_timeout,
            }),
        };

        metrics::histogram!("storefront.store.fetch_duration_seconds", "collection" => name.to_string())
            .record(started.elapsed().as_secs_f64());

        match result {
            Ok(rows) => {
                metrics::counter!(
                    "storefront.store.fetch",
                    "collection" => name.to_string(),
                    "outcome" => "ok"
                )
                .increment(1);
                tracing::debug!(records = rows.len(), "Collection fetched");

                let records = rows
                    .into_iter()
                    .map(|(key, body)| Record::new(key, body))
                    .collect();
                Ok(Snapshot::new(name, records))
            }
            Err(error) => {
                metrics::counter!(
                    "storefront.store.fetch",
                    "collection" => name.to_string(),
                    "outcome" => "unavailable"
                )
                .increment(1);
                tracing::warn!(error = %error, "Collection fetch failed");
                Err(error)
            }
        }
    }
}

impl CollectionStore for PostgresCollectionStore {
    fn fetch_collection<'a>(
        &'a self,
        name: &'a str,
    ) -> Pin<Box<dyn Future<Output = store::Result<Snapshot>> + Send + 'a>> {
        Box::pin(self.fetch(name))
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
