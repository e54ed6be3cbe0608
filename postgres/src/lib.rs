//! `PostgreSQL` document store for the storefront.
//!
//! This crate provides a PostgreSQL-backed implementation of the
//! `CollectionStore` trait from `storefront-core`. Checkout and catalog
//! administration write JSON documents into a single `documents` table; the
//! storefront reads whole collections back in insertion order.
//!
//! - Connection pooling
//! - Per-fetch deadline (reported as `StoreError::Timeout`)
//! - Embedded migrations
//! - Fetch counters and latency histograms via `metrics`
//!
//! # Example
//!
//! ```ignore
//! use storefront_postgres::PostgresCollectionStore;
//! use storefront_core::StorefrontService;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = PostgresCollectionStore::connect(
//!         "postgres://localhost/storefront",
//!         10,
//!         std::time::Duration::from_secs(5),
//!     ).await?;
//!     let service = StorefrontService::new(std::sync::Arc::new(store));
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod collection_store;

pub use collection_store::{DEFAULT_FETCH_TIMEOUT, DOCUMENTS_TABLE, PostgresCollectionStore};
