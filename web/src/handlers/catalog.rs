//! Catalog listing endpoint.
//!
//! - GET /api/catalog?category=<c>&page=<n> - A category revealed up to page n
//!
//! The HTTP surface is stateless, so a "load more" click is simply the
//! next page number; the session is rebuilt from a fresh snapshot and
//! advanced to it.

use crate::WebResult;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;
use std::num::NonZeroUsize;
use storefront_core::CatalogPage;

/// Query parameters for [`get_catalog`].
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    /// Category to browse (defaults to the configured listing category)
    pub category: Option<String>,
    /// Page to reveal up to, starting at 1
    pub page: Option<usize>,
}

/// Reveal a category up to the requested page.
///
/// # Example
///
/// ```bash
/// curl "http://localhost:8080/api/catalog?category=digital-tools&page=2"
/// ```
///
/// Response:
/// ```json
/// {
///   "category": "digital-tools",
///   "displayed": [{"id": "p1", "category": "digital-tools", "name": "Icon pack"}],
///   "hasMore": false,
///   "page": 2,
///   "total": 10,
///   "status": "ready"
/// }
/// ```
pub async fn get_catalog(
    State(state): State<AppState>,
    query: Result<Query<CatalogQuery>, QueryRejection>,
) -> WebResult<Json<CatalogPage>> {
    let Query(query) = query?;

    let page = match query.page {
        None => NonZeroUsize::MIN,
        Some(page) => {
            NonZeroUsize::new(page).ok_or_else(|| AppError::bad_request("page must be at least 1"))?
        }
    };

    let category = query.category.as_deref().filter(|c| !c.trim().is_empty());
    Ok(Json(state.service.catalog_page(category, page).await))
}
