//! Read-only access to the backing document store.
//!
//! # Overview
//!
//! The storefront never writes. Everything it needs is a point-in-time copy
//! of a named collection (`"orders"` or `"products"`), fetched once per
//! request and then handed to the pure transformations in [`crate::ledger`]
//! and [`crate::catalog`].
//!
//! ```text
//! ┌──────────────────────┐  fetch_collection("orders")   ┌──────────────┐
//! │  CollectionStore     │ ────────────────────────────▶ │  Snapshot    │
//! │  (Postgres, memory)  │                               │  Vec<Record> │
//! └──────────────────────┘                               └──────┬───────┘
//!                                                               │ from_record
//!                                                               ▼
//!                                                     Order / Product values
//! ```
//!
//! # Implementations
//!
//! - `PostgresCollectionStore` (in `storefront-postgres`): JSONB documents table
//! - `InMemoryCollectionStore` (in `storefront-testing`): tests and local runs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use thiserror::Error;

/// Name of the order collection.
pub const ORDERS: &str = "orders";

/// Name of the product catalog collection.
pub const PRODUCTS: &str = "products";

/// Errors returned by a [`CollectionStore`].
///
/// Both variants mean the same thing to the core: the snapshot could not be
/// obtained, so the caller degrades to an empty result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached or rejected the read.
    #[error("Store unavailable while fetching {collection}: {reason}")]
    Unavailable {
        /// Collection being fetched.
        collection: String,
        /// Backend-specific failure description.
        reason: String,
    },

    /// The fetch did not complete within the configured deadline.
    #[error("Store fetch of {collection} timed out after {elapsed:?}")]
    Timeout {
        /// Collection being fetched.
        collection: String,
        /// Deadline that was exceeded.
        elapsed: Duration,
    },
}

impl StoreError {
    /// Build an [`StoreError::Unavailable`] for `collection`.
    #[must_use]
    pub fn unavailable(collection: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            collection: collection.into(),
            reason: reason.into(),
        }
    }

    /// Collection the failed fetch was targeting.
    #[must_use]
    pub fn collection(&self) -> &str {
        match self {
            Self::Unavailable { collection, .. } | Self::Timeout { collection, .. } => collection,
        }
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// One raw document from a collection.
///
/// The body is untyped JSON; typing happens at the boundary via
/// `Order::from_record` / `Product::from_record`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Document key within its collection.
    pub key: String,
    /// Document body.
    pub body: Value,
}

impl Record {
    /// Create a new record.
    #[must_use]
    pub fn new(key: impl Into<String>, body: Value) -> Self {
        Self {
            key: key.into(),
            body,
        }
    }
}

/// A point-in-time, read-only copy of a collection.
///
/// Records are kept in the store's own key order. Nothing downstream sorts
/// them, so this order is the order users see.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    collection: String,
    records: Vec<Record>,
}

impl Snapshot {
    /// Create a snapshot of `collection` from records in store order.
    #[must_use]
    pub fn new(collection: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            collection: collection.into(),
            records,
        }
    }

    /// Name of the collection this snapshot was taken from.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Records in store order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records in store order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Read capability over the backing store.
///
/// # Dyn Compatibility
///
/// Uses `Pin<Box<dyn Future>>` instead of `impl Future` so the web layer can
/// hold an `Arc<dyn CollectionStore>` and swap backends at startup.
pub trait CollectionStore: Send + Sync {
    /// Fetch every record under `name`, in store order.
    ///
    /// Called once per request. Implementations must not retry; retry policy
    /// belongs to whoever configures the backend.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the backend cannot serve the read,
    /// or [`StoreError::Timeout`] if it exceeded its deadline.
    fn fetch_collection<'a>(
        &'a self,
        name: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Snapshot>> + Send + 'a>>;

    /// Short backend identifier used in logs and health output.
    fn backend(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snapshot_preserves_record_order() {
        let snapshot = Snapshot::new(
            ORDERS,
            vec![
                Record::new("z", json!({})),
                Record::new("a", json!({})),
                Record::new("m", json!({})),
            ],
        );

        let keys: Vec<&str> = snapshot.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, ["z", "a", "m"]);
        assert_eq!(snapshot.collection(), "orders");
        assert_eq!(snapshot.len(), 3);
    }

    #[test]
    fn test_store_error_display() {
        let err = StoreError::unavailable(PRODUCTS, "connection refused");
        assert_eq!(
            err.to_string(),
            "Store unavailable while fetching products: connection refused"
        );
        assert_eq!(err.collection(), "products");

        let err = StoreError::Timeout {
            collection: ORDERS.to_string(),
            elapsed: Duration::from_millis(250),
        };
        assert_eq!(err.collection(), "orders");
        assert!(err.to_string().contains("timed out"));
    }
}
