//! Shop information types.

use serde::{Deserialize, Serialize};

/// Basic information about the connected shop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shop {
    /// Shop display name.
    pub name: String,
    /// Shop contact email.
    pub email: String,
    /// The myshopify.com domain.
    pub myshopify_domain: String,
    /// URL of the shop's primary domain.
    pub primary_domain_url: String,
}
