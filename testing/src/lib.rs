//! # Storefront Testing
//!
//! Testing utilities for the storefront crates.
//!
//! This crate provides:
//! - [`InMemoryCollectionStore`]: a seedable, switchable [`CollectionStore`]
//! - [`fixtures`]: builders for raw order and product documents
//! - [`properties`]: proptest strategies for orders and catalogs
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use storefront_core::{SnapshotStatus, StorefrontService};
//! use storefront_core::store::ORDERS;
//! use storefront_testing::{InMemoryCollectionStore, fixtures::OrderBuilder};
//!
//! # async fn example() {
//! let store = InMemoryCollectionStore::new();
//! store.extend(ORDERS, [OrderBuilder::new("o1").user("u1").status("success").line("p1", "X", 10).build()]);
//!
//! let service = StorefrontService::new(Arc::new(store));
//! let report = service.purchases("u1").await;
//! assert_eq!(report.status, SnapshotStatus::Ready);
//! assert_eq!(report.purchases.len(), 1);
//! # }
//! ```
//!
//! [`CollectionStore`]: storefront_core::CollectionStore

pub mod fixtures;
pub mod in_memory;
pub mod properties;

// Re-export commonly used items
pub use in_memory::{InMemoryCollectionStore, SeedError};
