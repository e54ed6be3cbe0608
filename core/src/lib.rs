//! # Storefront Core
//!
//! Read-side logic for a storefront of digital items.
//!
//! Two independent transformations over store snapshots:
//!
//! - **Purchase ledger** ([`ledger`]): which products a buyer owns, derived from
//!   the raw order log on every request.
//! - **Catalog pagination** ([`catalog`]): a category's products revealed a
//!   page at a time for browsing.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Imperative Shell                       │  ← HTTP, store clients
//! │  - StorefrontService (one fetch/request)│
//! ├─────────────────────────────────────────┤
//! │  Functional Core                        │
//! │  - ledger::reconcile                    │  ← pure, no I/O
//! │  - CatalogSession                       │  ← caller-owned state
//! └─────────────────────────────────────────┘
//! ```
//!
//! The store is injected as a [`CollectionStore`]; the core never names a
//! concrete database client.
//!
//! ## Example
//!
//! ```
//! use storefront_core::{ledger, Order, OrderLine};
//!
//! let orders = vec![Order {
//!     order_id: "o1".into(),
//!     user_id: "u1".into(),
//!     payment_status: Some("Success".into()),
//!     payment_date: None,
//!     products: vec![OrderLine {
//!         id: "p1".into(),
//!         name: Some("X".into()),
//!         download_url: None,
//!         price: None,
//!         quantity: None,
//!     }],
//! }];
//!
//! let purchases = ledger::reconcile(&orders, "u1");
//! assert_eq!(purchases.len(), 1);
//! assert_eq!(purchases[0].quantity, serde_json::Number::from(1));
//! ```

pub mod catalog;
pub mod ledger;
pub mod service;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use catalog::{CatalogSession, CatalogView, DEFAULT_CATEGORY, DEFAULT_PAGE_SIZE};
pub use service::{CatalogPage, LedgerReport, SnapshotStatus, StorefrontService};
pub use store::{CollectionStore, Record, Snapshot, StoreError};
pub use types::{Order, OrderLine, Product, Purchase, PurchaseStatus};
