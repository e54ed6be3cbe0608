//! Purchase ledger reconciliation.
//!
//! Derives what a buyer owns from the raw order log. A [`Purchase`] exists
//! for every product line of every order that belongs to the buyer and whose
//! payment status is `"success"` (any case). Nothing else produces one.
//!
//! ```text
//! orders snapshot ──▶ Order::from_record ──▶ reconcile(user) ──▶ Vec<Purchase>
//!   (store order)       (skip malformed)      (settled + owned)    (store order,
//!                                                                   line order)
//! ```

use crate::store::Snapshot;
use crate::types::{Order, OrderLine, Purchase, PurchaseStatus};
use serde_json::Number;

/// Quantity assumed when an order line carries none.
pub const DEFAULT_QUANTITY: u64 = 1;

/// Build `user_id`'s purchases from a full order collection.
///
/// Orders are visited in the given order and their lines in checkout order,
/// so the output is deterministic for a fixed input. Orders owned by other
/// users, or whose payment has not settled, contribute nothing. A product
/// listed twice in one order yields two purchases.
#[must_use]
pub fn reconcile(orders: &[Order], user_id: &str) -> Vec<Purchase> {
    orders
        .iter()
        .filter(|order| order.user_id == user_id && order.is_settled())
        .flat_map(|order| order.products.iter().map(move |line| to_purchase(order, line)))
        .collect()
}

/// Coerce an orders snapshot and reconcile it for `user_id`.
///
/// Records that cannot be read as orders are skipped.
#[must_use]
pub fn reconcile_snapshot(snapshot: &Snapshot, user_id: &str) -> Vec<Purchase> {
    reconcile(&orders_from_snapshot(snapshot), user_id)
}

/// Coerce every usable record of an orders snapshot, preserving store order.
#[must_use]
pub fn orders_from_snapshot(snapshot: &Snapshot) -> Vec<Order> {
    snapshot.iter().filter_map(Order::from_record).collect()
}

fn to_purchase(order: &Order, line: &OrderLine) -> Purchase {
    Purchase {
        order_id: order.order_id.clone(),
        product_id: line.id.clone(),
        product_name: line.name.clone(),
        download_url: line.download_url.clone(),
        status: PurchaseStatus::Completed,
        purchase_date: order.payment_date,
        price: line.price.clone(),
        quantity: line
            .quantity
            .clone()
            .unwrap_or_else(|| Number::from(DEFAULT_QUANTITY)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;
    use crate::store::{ORDERS, Record};
    use serde_json::{Value, json};

    fn line(id: &str) -> OrderLine {
        OrderLine {
            id: id.to_string(),
            name: Some(format!("name-{id}")),
            download_url: Some(format!("https://downloads.example/{id}")),
            price: Some(Number::from(5)),
            quantity: None,
        }
    }

    fn order(order_id: &str, user_id: &str, status: Option<&str>, lines: Vec<OrderLine>) -> Order {
        Order {
            order_id: order_id.to_string(),
            user_id: user_id.to_string(),
            payment_status: status.map(str::to_string),
            payment_date: None,
            products: lines,
        }
    }

    #[test]
    fn test_settled_order_lines_become_purchases() {
        let orders = vec![
            order("o1", "u1", Some("Success"), vec![line("p1"), line("p2")]),
            order("o2", "u1", Some("failed"), vec![line("p3")]),
        ];

        let purchases = reconcile(&orders, "u1");

        let ids: Vec<(&str, &str)> = purchases
            .iter()
            .map(|p| (p.order_id.as_str(), p.product_id.as_str()))
            .collect();
        assert_eq!(ids, [("o1", "p1"), ("o1", "p2")]);
        assert!(purchases.iter().all(|p| p.status == PurchaseStatus::Completed));
    }

    #[test]
    fn test_unsettled_statuses_yield_nothing() {
        for status in [None, Some("pending"), Some("failed"), Some(""), Some("successful")] {
            let orders = vec![order("o1", "u1", status, vec![line("p1")])];
            assert!(
                reconcile(&orders, "u1").is_empty(),
                "status {status:?} must not produce purchases"
            );
        }
    }

    #[test]
    fn test_other_users_orders_are_ignored() {
        let orders = vec![
            order("o1", "u2", Some("success"), vec![line("p1")]),
            order("o2", "u1", Some("SUCCESS"), vec![line("p2")]),
        ];

        let purchases = reconcile(&orders, "u1");
        assert_eq!(purchases.len(), 1);
        assert_eq!(purchases[0].order_id, "o2");
    }

    #[test]
    fn test_duplicate_lines_yield_duplicate_purchases() {
        let orders = vec![order("o1", "u1", Some("success"), vec![line("p1"), line("p1")])];
        let purchases = reconcile(&orders, "u1");
        assert_eq!(purchases.len(), 2);
        assert_eq!(purchases[0], purchases[1]);
    }

    #[test]
    fn test_quantity_defaults_to_one() {
        let mut with_quantity = line("p2");
        with_quantity.quantity = Some(Number::from(4));
        let orders = vec![order("o1", "u1", Some("success"), vec![line("p1"), with_quantity])];

        let purchases = reconcile(&orders, "u1");
        assert_eq!(purchases[0].quantity, Number::from(1));
        assert_eq!(purchases[1].quantity, Number::from(4));
    }

    #[test]
    fn test_unusual_quantities_are_kept() {
        let snapshot = Snapshot::new(
            ORDERS,
            vec![Record::new(
                "o1",
                json!({"userId": "u1", "paymentStatus": "success", "products": [
                    {"id": "half", "quantity": 2.5},
                    {"id": "huge", "quantity": 4_294_967_296_u64},
                    {"id": "negative", "quantity": -3},
                    {"id": "zero", "quantity": 0}
                ]}),
            )],
        );

        let quantities: Vec<Value> = reconcile_snapshot(&snapshot, "u1")
            .into_iter()
            .map(|p| Value::Number(p.quantity))
            .collect();
        assert_eq!(quantities, [json!(2.5), json!(4_294_967_296_u64), json!(-3), json!(1)]);
    }

    #[test]
    fn test_snapshot_order_is_kept_not_date_order() {
        let snapshot = Snapshot::new(
            ORDERS,
            vec![
                Record::new(
                    "late",
                    json!({"userId": "u1", "paymentStatus": "success",
                           "paymentDate": "2025-06-01T00:00:00Z", "products": [{"id": "a"}]}),
                ),
                Record::new(
                    "early",
                    json!({"userId": "u1", "paymentStatus": "success",
                           "paymentDate": "2024-01-01T00:00:00Z", "products": [{"id": "b"}]}),
                ),
            ],
        );

        let purchases = reconcile_snapshot(&snapshot, "u1");
        let order_ids: Vec<&str> = purchases.iter().map(|p| p.order_id.as_str()).collect();
        assert_eq!(order_ids, ["late", "early"]);
        assert_eq!(
            purchases[0].purchase_date.unwrap().to_rfc3339(),
            "2025-06-01T00:00:00+00:00"
        );
    }

    #[test]
    fn test_malformed_records_are_skipped() {
        let snapshot = Snapshot::new(
            ORDERS,
            vec![
                Record::new("bad", json!(null)),
                Record::new("no-products", json!({"userId": "u1", "paymentStatus": "success"})),
                Record::new(
                    "odd-products",
                    json!({"userId": "u1", "paymentStatus": "success", "products": "p1"}),
                ),
                Record::new(
                    "good",
                    json!({"userId": "u1", "paymentStatus": "success", "products": [{"id": "p9"}]}),
                ),
            ],
        );

        let purchases = reconcile_snapshot(&snapshot, "u1");
        assert_eq!(purchases.len(), 1);
        assert_eq!(purchases[0].product_id, "p9");
    }

    #[test]
    fn test_scenario_output_shape() {
        let snapshot = Snapshot::new(
            ORDERS,
            vec![
                Record::new(
                    "o1",
                    json!({"orderId": "o1", "userId": "u1", "paymentStatus": "Success",
                           "products": [{"id": "p1", "name": "X", "price": 10}]}),
                ),
                Record::new(
                    "o2",
                    json!({"orderId": "o2", "userId": "u1", "paymentStatus": "failed",
                           "products": [{"id": "p2", "name": "Y", "price": 20}]}),
                ),
            ],
        );

        let json = serde_json::to_value(reconcile_snapshot(&snapshot, "u1")).unwrap();
        assert_eq!(
            json,
            json!([{
                "orderId": "o1",
                "productId": "p1",
                "productName": "X",
                "downloadUrl": null,
                "status": "completed",
                "purchaseDate": null,
                "price": 10,
                "quantity": 1
            }])
        );
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let orders = vec![
            order("o1", "u1", Some("success"), vec![line("p1")]),
            order("o2", "u1", Some("success"), vec![line("p2"), line("p3")]),
        ];
        let before = orders.clone();

        assert_eq!(reconcile(&orders, "u1"), reconcile(&orders, "u1"));
        assert_eq!(orders, before);
    }
}
