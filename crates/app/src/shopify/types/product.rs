//! Product types for the Admin API catalog listing.

use serde::{Deserialize, Serialize};

use super::common::{MediaImage, PageInfo};

/// A product variant with pricing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Shopify variant ID.
    pub id: String,
    /// Price as decimal string (preserves precision).
    pub price: String,
    /// Compare-at price as decimal string, if set.
    pub compare_at_price: Option<String>,
}

/// A product from the remote catalog.
///
/// Ephemeral: re-fetched on every navigation, never persisted locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogProduct {
    /// Shopify product ID (e.g., `gid://shopify/Product/123`).
    pub id: String,
    /// Product title.
    pub title: String,
    /// URL handle.
    pub handle: String,
    /// Plain-text description.
    pub description: String,
    /// Product images (first 5).
    pub media: Vec<MediaImage>,
    /// Product variants with pricing (first 5).
    pub variants: Vec<ProductVariant>,
}

/// A page of products with pagination info.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductConnection {
    /// Products in this page, in remote catalog order.
    pub products: Vec<CatalogProduct>,
    /// Pagination information.
    pub page_info: PageInfo,
}
