//! Property-based testing utilities using proptest.
//!
//! Strategies generate typed orders and products over small id spaces so
//! collisions (same user, same category, duplicate lines) actually happen.

use proptest::collection::vec;
use proptest::prelude::*;
use serde_json::{Map, Number};
use storefront_core::{Order, OrderLine, Product};

/// Users drawn by [`arb_order`].
pub const USERS: [&str; 3] = ["u1", "u2", "u3"];

/// Categories drawn by [`arb_product`].
pub const CATEGORIES: [&str; 3] = ["digital-tools", "ebooks", "fonts"];

/// Randomly re-case ASCII letters of `s`.
pub fn arb_casing(s: &'static str) -> impl Strategy<Value = String> {
    vec(any::<bool>(), s.len()).prop_map(move |upper| {
        s.chars()
            .zip(upper)
            .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
            .collect()
    })
}

/// Payment statuses: settled in any casing, the usual unsettled values,
/// absent, and noise.
pub fn arb_payment_status() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        3 => arb_casing("success").prop_map(Some),
        1 => Just(Some("pending".to_string())),
        1 => Just(Some("failed".to_string())),
        1 => Just(None),
        1 => "[a-z]{0,10}".prop_map(Some),
    ]
}

/// A product line with ids from a small pool.
pub fn arb_order_line() -> impl Strategy<Value = OrderLine> {
    ("p[0-9]", proptest::option::of(1u32..5), 0u64..100).prop_map(|(id, quantity, price)| {
        OrderLine {
            name: Some(format!("Product {id}")),
            download_url: Some(format!("https://downloads.example/{id}")),
            id,
            price: Some(Number::from(price)),
            quantity: quantity.map(Number::from),
        }
    })
}

/// An order owned by one of [`USERS`].
pub fn arb_order() -> impl Strategy<Value = Order> {
    (
        "o[0-9]{1,3}",
        proptest::sample::select(USERS.to_vec()),
        arb_payment_status(),
        vec(arb_order_line(), 0..5),
    )
        .prop_map(|(order_id, user_id, payment_status, products)| Order {
            order_id,
            user_id: user_id.to_string(),
            payment_status,
            payment_date: None,
            products,
        })
}

/// An order log.
pub fn arb_orders() -> impl Strategy<Value = Vec<Order>> {
    vec(arb_order(), 0..20)
}

/// A product in one of [`CATEGORIES`] (any casing), or uncategorised.
pub fn arb_product() -> impl Strategy<Value = Product> {
    let category = prop_oneof![
        4 => proptest::sample::select(CATEGORIES.to_vec()).prop_flat_map(arb_casing).prop_map(Some),
        1 => Just(None),
    ];
    ("[a-z0-9]{1,6}", category).prop_map(|(id, category)| Product {
        id,
        category,
        attributes: Map::new(),
    })
}

/// A catalog.
pub fn arb_catalog() -> impl Strategy<Value = Vec<Product>> {
    vec(arb_product(), 0..40)
}
