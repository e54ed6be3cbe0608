//! Domain types for the storefront read side.
//!
//! Store documents are untyped JSON. The `from_record` constructors here are
//! the only place that inspects raw shapes: anything unusable is dropped
//! with a debug log instead of failing the whole snapshot.

use crate::store::Record;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Payment status value that marks a settled order (compared case-insensitively).
pub const SETTLED_PAYMENT_STATUS: &str = "success";

/// Compare two labels ignoring case, using full Unicode lowercasing.
#[must_use]
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

// ============================================================================
// Orders
// ============================================================================

/// A checkout record from the order collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order identifier: the document key in the order collection
    pub order_id: String,
    /// Owner of the order
    pub user_id: String,
    /// Free-text payment status, absent until checkout reports one
    pub payment_status: Option<String>,
    /// Settlement time
    pub payment_date: Option<DateTime<Utc>>,
    /// Product lines in checkout order
    pub products: Vec<OrderLine>,
}

impl Order {
    /// Whether the payment status is `"success"`, ignoring case.
    ///
    /// A missing status is treated as unsettled.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.payment_status
            .as_deref()
            .is_some_and(|status| eq_ignore_case(status, SETTLED_PAYMENT_STATUS))
    }

    /// Coerce a raw order document.
    ///
    /// The order id is always the record key. An `orderId` field in the body
    /// is ignored.
    ///
    /// Returns `None` when the body is not an object or has no usable
    /// `userId`, since such an order can never be attributed to a buyer.
    /// A missing or non-array `products` field yields an order with no lines.
    #[must_use]
    pub fn from_record(record: &Record) -> Option<Self> {
        let Some(body) = record.body.as_object() else {
            tracing::debug!(key = %record.key, "Skipping order: body is not an object");
            return None;
        };

        let Some(user_id) = body.get("userId").and_then(coerce_id) else {
            tracing::debug!(key = %record.key, "Skipping order: missing userId");
            return None;
        };

        let order_id = record.key.clone();

        let products = match body.get("products") {
            Some(Value::Array(lines)) => lines
                .iter()
                .filter_map(|line| {
                    let parsed = OrderLine::from_value(line);
                    if parsed.is_none() {
                        tracing::debug!(order_id = %order_id, "Skipping malformed product line");
                    }
                    parsed
                })
                .collect(),
            _ => Vec::new(),
        };

        let payment_date = body.get("paymentDate").and_then(|raw| {
            let parsed = parse_timestamp(raw);
            if parsed.is_none() && !raw.is_null() {
                tracing::debug!(
                    order_id = %order_id,
                    payment_date = %raw,
                    "Dropping unreadable paymentDate"
                );
            }
            parsed
        });

        Some(Self {
            order_id,
            user_id,
            payment_status: body
                .get("paymentStatus")
                .and_then(Value::as_str)
                .map(str::to_string),
            payment_date,
            products,
        })
    }
}

/// A single product line inside an order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    /// Product identifier
    pub id: String,
    /// Display name at checkout time
    pub name: Option<String>,
    /// Where the buyer downloads the item
    pub download_url: Option<String>,
    /// Price as recorded by checkout, passed through untouched
    pub price: Option<Number>,
    /// Quantity as recorded by checkout, `None` when absent or falsy
    pub quantity: Option<Number>,
}

impl OrderLine {
    /// Coerce a raw product line. Lines that are not objects or have no `id`
    /// are malformed and return `None`.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let line = value.as_object()?;
        Some(Self {
            id: line.get("id").and_then(coerce_id)?,
            name: line.get("name").and_then(Value::as_str).map(str::to_string),
            download_url: line
                .get("downloadUrl")
                .and_then(Value::as_str)
                .map(str::to_string),
            price: line.get("price").and_then(coerce_number),
            quantity: line.get("quantity").and_then(coerce_quantity),
        })
    }
}

// ============================================================================
// Purchases
// ============================================================================

/// Status of a derived purchase. Only completed purchases exist.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PurchaseStatus {
    /// Payment settled
    #[default]
    Completed,
}

/// One owned product line, derived from a settled order.
///
/// Never stored; recomputed from the order log on every request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    /// Source order
    pub order_id: String,
    /// Purchased product
    pub product_id: String,
    /// Product name from the order line
    pub product_name: Option<String>,
    /// Download location from the order line
    pub download_url: Option<String>,
    /// Always [`PurchaseStatus::Completed`]
    pub status: PurchaseStatus,
    /// The order's payment date
    pub purchase_date: Option<DateTime<Utc>>,
    /// Price from the order line
    pub price: Option<Number>,
    /// Quantity from the order line, 1 when the line did not carry one
    pub quantity: Number,
}

// ============================================================================
// Products
// ============================================================================

/// A catalog entry.
///
/// Only `id` and `category` mean anything to the core. Every other field is
/// kept verbatim in `attributes` and flattened back out on serialization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier
    pub id: String,
    /// Category label, absent on uncategorised products
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Display attributes (name, price, image, ...)
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Product {
    /// Whether this product is in `category`, ignoring case.
    #[must_use]
    pub fn in_category(&self, category: &str) -> bool {
        self.category
            .as_deref()
            .is_some_and(|own| eq_ignore_case(own, category))
    }

    /// Coerce a raw product document. The id falls back to the document key.
    ///
    /// Returns `None` when the body is not an object.
    #[must_use]
    pub fn from_record(record: &Record) -> Option<Self> {
        let Some(body) = record.body.as_object() else {
            tracing::debug!(key = %record.key, "Skipping product: body is not an object");
            return None;
        };

        let mut attributes = body.clone();
        let id = attributes
            .remove("id")
            .as_ref()
            .and_then(coerce_id)
            .unwrap_or_else(|| record.key.clone());
        let category = match attributes.remove("category") {
            Some(Value::String(category)) => Some(category),
            _ => None,
        };

        Some(Self {
            id,
            category,
            attributes,
        })
    }
}

// ============================================================================
// Coercion helpers
// ============================================================================

fn coerce_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn coerce_number(value: &Value) -> Option<Number> {
    match value {
        Value::Number(n) => Some(n.clone()),
        Value::String(s) => s.trim().parse::<Number>().ok(),
        _ => None,
    }
}

/// Falsy quantities (`0`, `""`, `false`, `null`) count as absent. Any other
/// number passes through unchanged, fractional or negative included.
/// Numeric strings are read as numbers; other values fall back to absent.
fn coerce_quantity(value: &Value) -> Option<Number> {
    let quantity = coerce_number(value).filter(|n| !is_zero(n));
    if quantity.is_none() && is_truthy(value) {
        tracing::debug!(quantity = %value, "Ignoring non-numeric quantity");
    }
    quantity
}

#[allow(clippy::float_cmp)] // Exact zero is the only falsy number
fn is_zero(n: &Number) -> bool {
    n.as_f64().is_some_and(|f| f == 0.0)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => !is_zero(n),
        _ => true,
    }
}

/// Accepts RFC 3339 strings, offset-less date-times and plain dates (read as
/// UTC), epoch milliseconds, and `{seconds, nanoseconds}` timestamp objects
/// (with or without a leading underscore).
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_timestamp_str(s.trim()),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        Value::Object(fields) => {
            let seconds = fields
                .get("seconds")
                .or_else(|| fields.get("_seconds"))
                .and_then(Value::as_i64)?;
            let nanos = fields
                .get("nanoseconds")
                .or_else(|| fields.get("_nanoseconds"))
                .and_then(Value::as_u64)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0);
            DateTime::from_timestamp(seconds, nanos)
        }
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
