//! HTTP route handlers for the embedded-app backend.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                        - Liveness check
//! GET  /health/ready                  - Readiness check (DB ping)
//!
//! # Catalog (proxied to Shopify Admin API)
//! GET  /api/products                  - Paginated, searchable product listing
//! GET  /api/store-info                - Shop name/email/domains
//!
//! # Tracked products (local mirror)
//! POST /api/add-product               - Track a remote product
//! POST /api/update-product            - Overwrite a tracked product
//! POST /api/delete-product            - Untrack by remote product id
//! GET  /api/existing-products         - List all tracked products
//! GET  /api/proxy/desc-product/{id}   - Description lookup for the theme proxy
//! ```

pub mod products;
pub mod shop;
pub mod tracked;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Build the application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/api/products", get(products::list))
        .route("/api/store-info", get(shop::info))
        // Tracked products
        .route("/api/add-product", post(tracked::add))
        .route("/api/update-product", post(tracked::update))
        .route("/api/delete-product", post(tracked::delete))
        .route("/api/existing-products", get(tracked::list))
        .route(
            "/api/proxy/desc-product/{product_id}",
            get(tracked::description),
        )
}
