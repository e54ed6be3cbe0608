//! Request-scoped entry points over an injected [`CollectionStore`].
//!
//! Each call fetches exactly one snapshot, runs the pure transformation on
//! it, and returns. A failed fetch is not an error to the caller: the result
//! is empty and `status` says why, so "no purchases" and "store down" stay
//! distinguishable.

use crate::catalog::{CatalogSession, DEFAULT_CATEGORY, DEFAULT_PAGE_SIZE};
use crate::ledger;
use crate::store::{self, CollectionStore, StoreError};
use crate::types::{Product, Purchase};
use serde::Serialize;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Whether a result was computed from a fresh snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SnapshotStatus {
    /// The snapshot was fetched and transformed.
    Ready,
    /// The fetch failed; the accompanying result is empty.
    StoreUnavailable,
}

/// A buyer's purchases, as returned to the UI.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LedgerReport {
    /// Purchases in store order
    pub purchases: Vec<Purchase>,
    /// Snapshot outcome
    pub status: SnapshotStatus,
}

/// One page of a category listing, as returned to the UI.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPage {
    /// Category that was browsed
    pub category: String,
    /// Revealed products
    pub displayed: Vec<Product>,
    /// Whether more products can be revealed
    pub has_more: bool,
    /// Page reached
    pub page: usize,
    /// Products in the category
    pub total: usize,
    /// Snapshot outcome
    pub status: SnapshotStatus,
}

/// Storefront read operations bound to a store.
#[derive(Clone)]
pub struct StorefrontService {
    store: Arc<dyn CollectionStore>,
    category: String,
    page_size: NonZeroUsize,
}

impl std::fmt::Debug for StorefrontService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontService")
            .field("backend", &self.store.backend())
            .field("category", &self.category)
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl StorefrontService {
    /// Create a service with the default listing (`digital-tools`, 8 per page).
    #[must_use]
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self {
            store,
            category: DEFAULT_CATEGORY.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Override the category used when a caller does not name one.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Override the page size.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: NonZeroUsize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Default category.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Products per page.
    #[must_use]
    pub const fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// Backend identifier of the underlying store.
    #[must_use]
    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    /// Fetch the product collection once to confirm the store answers.
    ///
    /// Returns the number of product documents.
    ///
    /// # Errors
    ///
    /// Returns the [`StoreError`] from the fetch.
    pub async fn probe(&self) -> Result<usize, StoreError> {
        Ok(self.store.fetch_collection(store::PRODUCTS).await?.len())
    }

    /// Reconcile `user_id`'s purchases from a fresh orders snapshot.
    #[tracing::instrument(skip(self), fields(backend = self.store.backend()))]
    pub async fn purchases(&self, user_id: &str) -> LedgerReport {
        match self.store.fetch_collection(store::ORDERS).await {
            Ok(snapshot) => {
                let purchases = ledger::reconcile_snapshot(&snapshot, user_id);
                tracing::debug!(
                    orders = snapshot.len(),
                    purchases = purchases.len(),
                    "Purchase ledger reconciled"
                );
                metrics::counter!("storefront.ledger.purchases").increment(purchases.len() as u64);
                LedgerReport {
                    purchases,
                    status: SnapshotStatus::Ready,
                }
            }
            Err(error) => {
                log_unavailable(&error);
                LedgerReport {
                    purchases: Vec::new(),
                    status: SnapshotStatus::StoreUnavailable,
                }
            }
        }
    }

    /// Start a browsing session over a fresh products snapshot.
    ///
    /// Callers that keep sessions alive between reveals use this directly and
    /// call [`CatalogSession::advance`] themselves.
    ///
    /// # Errors
    ///
    /// Returns the [`StoreError`] if the products snapshot cannot be fetched.
    #[tracing::instrument(skip(self), fields(backend = self.store.backend()))]
    pub async fn catalog_session(&self, category: &str) -> Result<CatalogSession, StoreError> {
        let snapshot = self.store.fetch_collection(store::PRODUCTS).await?;
        Ok(CatalogSession::from_snapshot(&snapshot, category, self.page_size))
    }

    /// Build the listing for `category` (or the default) revealed up to `page`.
    ///
    /// Pages past the end clamp to the last page that reveals anything new.
    pub async fn catalog_page(&self, category: Option<&str>, page: NonZeroUsize) -> CatalogPage {
        let category = category.unwrap_or(&self.category).to_string();

        let session = self.catalog_session(&category).await;
        match session {
            Ok(mut session) => {
                let view = session.advance_to(page.get());
                CatalogPage {
                    displayed: view.displayed.to_vec(),
                    has_more: view.has_more,
                    page: view.page,
                    total: view.total,
                    status: SnapshotStatus::Ready,
                    category,
                }
            }
            Err(error) => {
                log_unavailable(&error);
                CatalogPage {
                    category,
                    displayed: Vec::new(),
                    has_more: false,
                    page: 1,
                    total: 0,
                    status: SnapshotStatus::StoreUnavailable,
                }
            }
        }
    }
}

fn log_unavailable(error: &StoreError) {
    tracing::warn!(
        collection = error.collection(),
        error = %error,
        "Store unavailable, returning empty result"
    );
}
