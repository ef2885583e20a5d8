//! Common domain types shared across Shopify Admin API.

use serde::{Deserialize, Serialize};

// =============================================================================
// Image Types
// =============================================================================

/// Product media image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaImage {
    /// Image URL.
    pub url: String,
    /// Alt text for accessibility.
    pub alt_text: Option<String>,
}

// =============================================================================
// Pagination Types
// =============================================================================

/// Pagination information.
///
/// Cursors are opaque tokens minted by the remote catalog. They are carried
/// verbatim and never inspected or constructed locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Whether there are more items after this page.
    pub has_next_page: bool,
    /// Whether there are items before this page.
    pub has_previous_page: bool,
    /// Cursor for the first item.
    pub start_cursor: Option<String>,
    /// Cursor for the last item.
    pub end_cursor: Option<String>,
}
