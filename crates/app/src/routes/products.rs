//! Catalog listing route handler (proxied to the Shopify Admin API).

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    error::{ApiError, ValidationErrors},
    paging::{Direction, PageRequest},
    shopify::types::ProductConnection,
    state::AppState,
};

/// Smallest allowed page size.
const MIN_PAGE_SIZE: i64 = 1;
/// Largest allowed page size.
const MAX_PAGE_SIZE: i64 = 50;
/// Page size when the client does not specify one.
const DEFAULT_PAGE_SIZE: i64 = 10;

/// Pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    /// Opaque cursor from a previous response; omitted for the first page.
    pub cursor: Option<String>,
    /// Traversal direction (default: forward).
    pub direction: Option<Direction>,
    /// Search term (default: unfiltered).
    pub search: Option<String>,
    /// Page size, 1..=50 (default: 10).
    pub per_page: Option<i64>,
}

impl CatalogQuery {
    /// Validate parameters and build the page request.
    fn into_request(self) -> Result<PageRequest, ApiError> {
        let mut errors = ValidationErrors::new();

        let per_page = self.per_page.unwrap_or(DEFAULT_PAGE_SIZE);
        if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&per_page) {
            errors.add(
                "per_page",
                format!("per_page must be between {MIN_PAGE_SIZE} and {MAX_PAGE_SIZE}"),
            );
        }

        let direction = self.direction.unwrap_or(Direction::Forward);
        if direction == Direction::Backward && self.cursor.is_none() {
            errors.add("cursor", "cursor is required for backward pagination");
        }

        errors.into_result()?;

        Ok(PageRequest {
            cursor: self.cursor,
            direction,
            search: self.search.unwrap_or_default(),
            page_size: per_page,
        })
    }
}

/// Paginated product listing.
///
/// # Errors
///
/// Returns 422 on invalid parameters and 502 if the upstream catalog fails.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<ProductConnection>, ApiError> {
    let request = query.into_request()?;

    let connection = state.shopify().get_products(&request).await?;

    Ok(Json(connection))
}
