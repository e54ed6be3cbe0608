//! Catalog pagination for browsing sessions.
//!
//! A [`CatalogSession`] holds the products of one category and reveals them
//! a page at a time:
//!
//! ```text
//! filtered:  [p0 p1 p2 p3 p4 p5 p6 p7 | p8 p9]
//! page 1:     └──────── displayed ───┘          has_more = true
//! page 2:     └──────────── displayed ───────┘  has_more = false
//! ```
//!
//! The session is owned by exactly one browser session. `advance` takes
//! `&mut self`, so two reveals can never interleave.

use crate::store::Snapshot;
use crate::types::Product;
use serde::Serialize;
use std::num::NonZeroUsize;

/// Products revealed per page.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = NonZeroUsize::MIN.saturating_add(7);

/// Category browsed by the storefront's product listing.
pub const DEFAULT_CATEGORY: &str = "digital-tools";

/// Pagination state for one browsing session.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogSession {
    filtered: Vec<Product>,
    page: usize,
    page_size: NonZeroUsize,
}

impl CatalogSession {
    /// Start a session over the products of `category`.
    ///
    /// Matching is case-insensitive and exact; products without a category
    /// never match. Catalog order is kept as-is. The session starts on page 1.
    #[must_use]
    pub fn initialize<I>(catalog: I, category: &str, page_size: NonZeroUsize) -> Self
    where
        I: IntoIterator<Item = Product>,
    {
        let filtered: Vec<Product> = catalog
            .into_iter()
            .filter(|product| product.in_category(category))
            .collect();

        tracing::debug!(
            category,
            matched = filtered.len(),
            page_size = page_size.get(),
            "Catalog session initialized"
        );

        Self {
            filtered,
            page: 1,
            page_size,
        }
    }

    /// Start a session from a raw products snapshot.
    ///
    /// Records that cannot be read as products are skipped.
    #[must_use]
    pub fn from_snapshot(snapshot: &Snapshot, category: &str, page_size: NonZeroUsize) -> Self {
        Self::initialize(
            snapshot.iter().filter_map(Product::from_record),
            category,
            page_size,
        )
    }

    /// Reveal the next page.
    ///
    /// Once everything is displayed this is a no-op and the page counter
    /// stays where it is.
    pub fn advance(&mut self) -> CatalogView<'_> {
        if self.has_more() {
            self.page += 1;
        }
        self.view()
    }

    /// Advance until `page` is reached or nothing more remains.
    ///
    /// Never moves backwards: a target at or below the current page leaves
    /// the session unchanged.
    pub fn advance_to(&mut self, page: usize) -> CatalogView<'_> {
        while self.page < page && self.has_more() {
            self.page += 1;
        }
        self.view()
    }

    /// Whether products remain hidden.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.displayed_len() < self.filtered.len()
    }

    /// Current view of the session.
    #[must_use]
    pub fn view(&self) -> CatalogView<'_> {
        CatalogView {
            displayed: self.displayed(),
            has_more: self.has_more(),
            page: self.page,
            total: self.filtered.len(),
        }
    }

    /// All products of the category, in catalog order.
    #[must_use]
    pub fn filtered(&self) -> &[Product] {
        &self.filtered
    }

    /// The revealed prefix of [`CatalogSession::filtered`].
    #[must_use]
    pub fn displayed(&self) -> &[Product] {
        &self.filtered[..self.displayed_len()]
    }

    /// Current page, starting at 1.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Products per page.
    #[must_use]
    pub const fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    fn displayed_len(&self) -> usize {
        self.page
            .saturating_mul(self.page_size.get())
            .min(self.filtered.len())
    }
}

/// What the caller renders for a session.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView<'a> {
    /// Products to show
    pub displayed: &'a [Product],
    /// Whether a "load more" trigger should be offered
    pub has_more: bool,
    /// Current page
    pub page: usize,
    /// Number of products in the category
    pub total: usize,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;
    use crate::store::{PRODUCTS, Record};
    use serde_json::{Map, json};

    fn product(id: usize, category: Option<&str>) -> Product {
        Product {
            id: format!("p{id}"),
            category: category.map(str::to_string),
            attributes: Map::new(),
        }
    }

    fn tools(count: usize) -> Vec<Product> {
        (0..count).map(|i| product(i, Some("digital-tools"))).collect()
    }

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_default_page_size_is_eight() {
        assert_eq!(DEFAULT_PAGE_SIZE.get(), 8);
    }

    #[test]
    fn test_ten_products_reveal_in_two_steps() {
        let mut session = CatalogSession::initialize(tools(10), DEFAULT_CATEGORY, DEFAULT_PAGE_SIZE);

        let view = session.view();
        assert_eq!(view.displayed.len(), 8);
        assert!(view.has_more);
        assert_eq!(view.page, 1);

        let view = session.advance();
        assert_eq!(view.displayed.len(), 10);
        assert!(!view.has_more);
        assert_eq!(view.page, 2);

        let view = session.advance();
        assert_eq!(view.displayed.len(), 10);
        assert!(!view.has_more);
        assert_eq!(view.page, 2);
    }

    #[test]
    fn test_no_matches_is_empty_terminal_state() {
        let catalog = vec![product(1, Some("ebooks")), product(2, None)];
        let mut session = CatalogSession::initialize(catalog, DEFAULT_CATEGORY, DEFAULT_PAGE_SIZE);

        assert!(session.filtered().is_empty());
        assert!(session.displayed().is_empty());
        assert!(!session.has_more());

        let view = session.advance();
        assert_eq!(view.page, 1);
        assert_eq!(view.total, 0);
    }

    #[test]
    fn test_empty_catalog() {
        let session = CatalogSession::initialize(Vec::new(), DEFAULT_CATEGORY, DEFAULT_PAGE_SIZE);
        assert!(session.view().displayed.is_empty());
        assert!(!session.has_more());
    }

    #[test]
    fn test_filter_is_case_insensitive_and_keeps_order() {
        let catalog = vec![
            product(1, Some("Digital-Tools")),
            product(2, Some("ebooks")),
            product(3, Some("DIGITAL-TOOLS")),
            product(4, None),
            product(5, Some("digital-tools")),
            product(6, Some("digital-tools-pro")),
        ];

        let session = CatalogSession::initialize(catalog, "digital-tools", DEFAULT_PAGE_SIZE);
        let ids: Vec<&str> = session.filtered().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["p1", "p3", "p5"]);
    }

    #[test]
    fn test_exact_page_boundary_has_no_more() {
        let session = CatalogSession::initialize(tools(8), DEFAULT_CATEGORY, DEFAULT_PAGE_SIZE);
        assert_eq!(session.displayed().len(), 8);
        assert!(!session.has_more());
    }

    #[test]
    fn test_advance_is_monotonic_and_bounded() {
        let mut session = CatalogSession::initialize(tools(23), DEFAULT_CATEGORY, size(5));
        let mut previous = session.displayed().len();

        for _ in 0..10 {
            let shown = session.advance().displayed.len();
            assert!(shown >= previous);
            assert!(shown <= 23);
            previous = shown;
        }
        assert_eq!(previous, 23);
        assert_eq!(session.page(), 5);
    }

    #[test]
    fn test_advance_to_clamps_at_last_page() {
        let mut session = CatalogSession::initialize(tools(10), DEFAULT_CATEGORY, size(3));

        let view = session.advance_to(2);
        assert_eq!(view.page, 2);
        assert_eq!(view.displayed.len(), 6);

        let view = session.advance_to(99);
        assert_eq!(view.page, 4);
        assert_eq!(view.displayed.len(), 10);

        let view = session.advance_to(1);
        assert_eq!(view.page, 4);
    }

    #[test]
    fn test_from_snapshot_skips_malformed_records() {
        let snapshot = Snapshot::new(
            PRODUCTS,
            vec![
                Record::new("a", json!({"category": "digital-tools", "name": "A"})),
                Record::new("b", json!(7)),
                Record::new("c", json!({"category": "Digital-Tools", "name": "C"})),
            ],
        );

        let session = CatalogSession::from_snapshot(&snapshot, DEFAULT_CATEGORY, DEFAULT_PAGE_SIZE);
        let ids: Vec<&str> = session.filtered().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn test_view_serializes_camel_case() {
        let session = CatalogSession::initialize(tools(1), DEFAULT_CATEGORY, DEFAULT_PAGE_SIZE);
        let json = serde_json::to_value(session.view()).unwrap();
        assert_eq!(json["hasMore"], false);
        assert_eq!(json["page"], 1);
        assert_eq!(json["total"], 1);
        assert_eq!(json["displayed"][0]["id"], "p0");
    }
}
