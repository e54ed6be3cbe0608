//! Purchase ledger endpoint.
//!
//! - GET /api/users/:user_id/purchases - Everything the buyer owns

use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
};
use storefront_core::LedgerReport;

/// List a buyer's purchases.
///
/// Always 200. When the store is down the list is empty and `status` is
/// `"storeUnavailable"`.
///
/// # Example
///
/// ```bash
/// curl http://localhost:8080/api/users/u1/purchases
/// ```
///
/// Response:
/// ```json
/// {
///   "purchases": [
///     {
///       "orderId": "o1",
///       "productId": "p1",
///       "productName": "X",
///       "downloadUrl": "https://downloads.example/p1",
///       "status": "completed",
///       "purchaseDate": "2025-03-01T12:00:00Z",
///       "price": 10,
///       "quantity": 1
///     }
///   ],
///   "status": "ready"
/// }
/// ```
pub async fn list_purchases(
    Path(user_id): Path<String>,
    State(state): State<AppState>,
) -> Json<LedgerReport> {
    Json(state.service.purchases(&user_id).await)
}
