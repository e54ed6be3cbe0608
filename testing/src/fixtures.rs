//! Builders for raw store documents.
//!
//! Fixtures produce [`Record`]s shaped like what checkout and the catalog
//! admin actually write, so tests go through the same coercion as
//! production reads.

use serde_json::{Map, Value, json};
use storefront_core::store::Record;

/// Builder for an order document.
///
/// # Example
///
/// ```
/// use storefront_testing::fixtures::OrderBuilder;
///
/// let record = OrderBuilder::new("o1")
///     .user("u1")
///     .status("Success")
///     .line("p1", "Icon pack", 10)
///     .build();
///
/// assert_eq!(record.key, "o1");
/// assert_eq!(record.body["products"][0]["id"], "p1");
/// ```
#[derive(Clone, Debug)]
pub struct OrderBuilder {
    order_id: String,
    body: Map<String, Value>,
    lines: Vec<Value>,
}

impl OrderBuilder {
    /// Start an order keyed by `order_id`, with no user, status or lines.
    #[must_use]
    pub fn new(order_id: impl Into<String>) -> Self {
        let order_id = order_id.into();
        let mut body = Map::new();
        body.insert("orderId".to_string(), Value::String(order_id.clone()));
        Self {
            order_id,
            body,
            lines: Vec::new(),
        }
    }

    /// Set the owner.
    #[must_use]
    pub fn user(mut self, user_id: impl Into<String>) -> Self {
        self.body
            .insert("userId".to_string(), Value::String(user_id.into()));
        self
    }

    /// Set the payment status.
    #[must_use]
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.body
            .insert("paymentStatus".to_string(), Value::String(status.into()));
        self
    }

    /// Set the payment date (any JSON timestamp shape).
    #[must_use]
    pub fn paid_at(mut self, date: Value) -> Self {
        self.body.insert("paymentDate".to_string(), date);
        self
    }

    /// Append a product line with a derived download URL and no quantity.
    #[must_use]
    pub fn line(mut self, id: &str, name: &str, price: u64) -> Self {
        self.lines.push(json!({
            "id": id,
            "name": name,
            "downloadUrl": format!("https://downloads.example/{id}"),
            "price": price,
        }));
        self
    }

    /// Append a raw product line, malformed or not.
    #[must_use]
    pub fn raw_line(mut self, line: Value) -> Self {
        self.lines.push(line);
        self
    }

    /// Replace the `products` field with an arbitrary value, discarding lines.
    #[must_use]
    pub fn products_value(mut self, products: Value) -> Self {
        self.lines.clear();
        self.body.insert("products".to_string(), products);
        self
    }

    /// Build the record.
    #[must_use]
    pub fn build(mut self) -> Record {
        if !self.lines.is_empty() {
            self.body
                .insert("products".to_string(), Value::Array(self.lines));
        }
        Record::new(self.order_id, Value::Object(self.body))
    }
}

/// A product document in `category`, keyed by `id`.
#[must_use]
pub fn product_record(id: &str, category: &str) -> Record {
    Record::new(
        id,
        json!({
            "id": id,
            "category": category,
            "name": format!("Product {id}"),
            "price": 9,
            "image": format!("/images/{id}.png"),
        }),
    )
}

/// `count` products in `category`, keyed `{category}-{index}`.
#[must_use]
pub fn catalog(count: usize, category: &str) -> Vec<Record> {
    (0..count)
        .map(|i| product_record(&format!("{category}-{i}"), category))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::Order;

    #[test]
    fn test_order_builder_round_trips_through_coercion() {
        let record = OrderBuilder::new("o1")
            .user("u1")
            .status("success")
            .paid_at(json!("2025-01-01T00:00:00Z"))
            .line("p1", "X", 10)
            .line("p2", "Y", 20)
            .build();

        let order = Order::from_record(&record);
        assert!(order.is_some_and(|o| o.is_settled() && o.products.len() == 2));
    }

    #[test]
    fn test_builder_without_lines_has_no_products_field() {
        let record = OrderBuilder::new("o1").user("u1").build();
        assert!(record.body.get("products").is_none());
    }

    #[test]
    fn test_catalog_keys() {
        let records = catalog(3, "ebooks");
        let keys: Vec<&str> = records.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, ["ebooks-0", "ebooks-1", "ebooks-2"]);
    }
}
