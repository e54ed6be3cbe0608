//! In-memory collection store.
//!
//! Provides a fast, deterministic [`CollectionStore`] for tests and local
//! runs:
//! - insertion-ordered collections (re-inserting a key replaces it in place)
//! - JSON seeding (`{"orders": {...}, "products": [...]}`)
//! - an availability switch to exercise the degraded path
//! - a fetch counter to assert one snapshot per request

use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use storefront_core::store::{self, CollectionStore, Record, Snapshot, StoreError};

/// Errors raised while seeding an [`InMemoryCollectionStore`].
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// The seed file could not be read.
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    /// The seed file is not valid JSON.
    #[error("Seed file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The seed document does not have the expected shape.
    #[error("Invalid seed document: {0}")]
    Shape(String),
}

/// In-memory collection store.
///
/// Clones share the same data, so a test can keep a handle while the
/// service under test owns another.
///
/// # Example
///
/// ```
/// use storefront_testing::InMemoryCollectionStore;
/// use storefront_core::store::{CollectionStore, ORDERS};
/// use serde_json::json;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = InMemoryCollectionStore::new();
/// store.insert(ORDERS, "o1", json!({"userId": "u1", "paymentStatus": "success"}));
///
/// let snapshot = store.fetch_collection(ORDERS).await?;
/// assert_eq!(snapshot.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct InMemoryCollectionStore {
    collections: Arc<RwLock<HashMap<String, Vec<Record>>>>,
    available: Arc<AtomicBool>,
    fetches: Arc<AtomicUsize>,
}

impl InMemoryCollectionStore {
    /// Create a new empty, available store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            collections: Arc::new(RwLock::new(HashMap::new())),
            available: Arc::new(AtomicBool::new(true)),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Insert a document, replacing any document with the same key in place.
    pub fn insert(&self, collection: &str, key: impl Into<String>, body: Value) {
        let record = Record::new(key, body);
        let mut collections = self
            .collections
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let records = collections.entry(collection.to_string()).or_default();

        match records.iter_mut().find(|existing| existing.key == record.key) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
    }

    /// Append several records to a collection.
    pub fn extend(&self, collection: &str, records: impl IntoIterator<Item = Record>) {
        for record in records {
            self.insert(collection, record.key, record.body);
        }
    }

    /// Seed from a JSON document whose top-level keys are collection names.
    ///
    /// Each collection is either an object (keys become document keys, in
    /// document order) or an array (indices become document keys).
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::Shape`] if the document or a collection has the
    /// wrong JSON type.
    pub fn from_seed(seed: &Value) -> Result<Self, SeedError> {
        let Some(collections) = seed.as_object() else {
            return Err(SeedError::Shape("top level must be an object".to_string()));
        };

        let store = Self::new();
        for (name, documents) in collections {
            match documents {
                Value::Object(documents) => {
                    for (key, body) in documents {
                        store.insert(name, key.clone(), body.clone());
                    }
                }
                Value::Array(documents) => {
                    for (index, body) in documents.iter().enumerate() {
                        store.insert(name, index.to_string(), body.clone());
                    }
                }
                _ => {
                    return Err(SeedError::Shape(format!(
                        "collection {name} must be an object or an array"
                    )));
                }
            }
        }

        tracing::debug!(collections = collections.len(), "In-memory store seeded");
        Ok(store)
    }

    /// Seed from a JSON file. See [`InMemoryCollectionStore::from_seed`].
    ///
    /// # Errors
    ///
    /// Returns [`SeedError`] if the file cannot be read or parsed.
    pub fn from_seed_file(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let contents = std::fs::read_to_string(path)?;
        let seed: Value = serde_json::from_str(&contents)?;
        Self::from_seed(&seed)
    }

    /// Make subsequent fetches succeed (`true`) or fail with
    /// [`StoreError::Unavailable`] (`false`).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of fetches served or refused so far.
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Number of documents in `collection`.
    #[must_use]
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(collection)
            .map_or(0, Vec::len)
    }

    /// Remove every document from every collection.
    pub fn clear(&self) {
        self.collections
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn snapshot(&self, name: &str) -> Snapshot {
        let records = self
            .collections
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .unwrap_or_default();
        Snapshot::new(name, records)
    }
}

impl Default for InMemoryCollectionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectionStore for InMemoryCollectionStore {
    fn fetch_collection<'a>(
        &'a self,
        name: &'a str,
    ) -> Pin<Box<dyn Future<Output = store::Result<Snapshot>> + Send + 'a>> {
        Box::pin(async move {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if !self.available.load(Ordering::SeqCst) {
                return Err(StoreError::unavailable(name, "in-memory store marked unavailable"));
            }
            Ok(self.snapshot(name))
        })
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
