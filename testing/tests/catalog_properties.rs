//! Property tests for catalog pagination.

#![allow(clippy::unwrap_used)] // Tests can unwrap

use proptest::prelude::*;
use std::num::NonZeroUsize;
use storefront_core::{CatalogSession, Product};
use storefront_testing::properties::{CATEGORIES, arb_catalog};

fn page_size() -> impl Strategy<Value = NonZeroUsize> {
    (1usize..12).prop_map(|n| NonZeroUsize::new(n).unwrap())
}

proptest! {
    #[test]
    fn filtered_is_exactly_the_matching_products(catalog in arb_catalog(), size in page_size()) {
        for category in CATEGORIES {
            let expected: Vec<Product> = catalog
                .iter()
                .filter(|p| p.category.as_deref().is_some_and(|c| c.to_lowercase() == category))
                .cloned()
                .collect();

            let session = CatalogSession::initialize(catalog.clone(), category, size);
            prop_assert_eq!(session.filtered(), expected.as_slice());
        }
    }

    #[test]
    fn first_page_is_a_bounded_prefix(catalog in arb_catalog(), size in page_size()) {
        let session = CatalogSession::initialize(catalog, "digital-tools", size);
        let shown = session.displayed().len();

        prop_assert_eq!(shown, size.get().min(session.filtered().len()));
        prop_assert_eq!(session.displayed(), &session.filtered()[..shown]);
        prop_assert_eq!(session.page(), 1);
        prop_assert_eq!(session.has_more(), shown < session.filtered().len());
    }

    #[test]
    fn advance_is_monotonic_and_bounded(
        catalog in arb_catalog(),
        size in page_size(),
        steps in 0usize..15,
    ) {
        let mut session = CatalogSession::initialize(catalog, "ebooks", size);
        let total = session.filtered().len();
        let mut previous_len = session.displayed().len();
        let mut previous_page = session.page();

        for _ in 0..steps {
            let had_more = session.has_more();
            let view = session.advance();

            prop_assert!(view.displayed.len() >= previous_len);
            prop_assert!(view.displayed.len() <= total);
            if had_more {
                prop_assert_eq!(view.page, previous_page + 1);
            } else {
                prop_assert_eq!(view.page, previous_page);
                prop_assert_eq!(view.displayed.len(), previous_len);
            }

            previous_len = view.displayed.len();
            previous_page = view.page;
        }
    }

    #[test]
    fn initialize_is_deterministic(catalog in arb_catalog(), size in page_size()) {
        let first = CatalogSession::initialize(catalog.clone(), "fonts", size);
        let second = CatalogSession::initialize(catalog, "fonts", size);
        prop_assert_eq!(first, second);
    }
}
