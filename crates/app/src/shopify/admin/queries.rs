//! GraphQL query documents and wire types for the Shopify Admin API.
//!
//! Query documents are static strings; every request-specific value (cursor,
//! page size, search term) is passed through the `variables` object. Nothing
//! user-controlled is ever spliced into the query text.

use serde::{Deserialize, Serialize};

// =============================================================================
// Query documents
// =============================================================================

/// Forward catalog page: `products(first:, after:, query:)`.
pub const PRODUCTS_FORWARD_QUERY: &str = r"
query($cursor: String, $perPage: Int!, $query: String) {
    products(first: $perPage, after: $cursor, query: $query) {
        edges {
            node {
                id
                title
                handle
                description
                variants(first: 5) {
                    edges {
                        node {
                            id
                            price
                            compareAtPrice
                        }
                    }
                }
                media(first: 5) {
                    edges {
                        node {
                            ... on MediaImage {
                                id
                                image {
                                    url
                                    altText
                                }
                            }
                        }
                    }
                }
            }
        }
        pageInfo {
            hasPreviousPage
            hasNextPage
            startCursor
            endCursor
        }
    }
}
";

/// Backward catalog page: `products(last:, before:, query:)`.
pub const PRODUCTS_BACKWARD_QUERY: &str = r"
query($cursor: String, $perPage: Int!, $query: String) {
    products(last: $perPage, before: $cursor, query: $query) {
        edges {
            node {
                id
                title
                handle
                description
                variants(first: 5) {
                    edges {
                        node {
                            id
                            price
                            compareAtPrice
                        }
                    }
                }
                media(first: 5) {
                    edges {
                        node {
                            ... on MediaImage {
                                id
                                image {
                                    url
                                    altText
                                }
                            }
                        }
                    }
                }
            }
        }
        pageInfo {
            hasPreviousPage
            hasNextPage
            startCursor
            endCursor
        }
    }
}
";

/// Shop information for the embedded app home page.
pub const SHOP_QUERY: &str = r"
query {
    shop {
        name
        email
        myshopifyDomain
        primaryDomain {
            url
        }
    }
}
";

// =============================================================================
// Variables
// =============================================================================

/// Variables for the catalog page queries.
///
/// `cursor` is `None` for the first page of a given (search, page size)
/// combination; otherwise it is the cursor returned by the previous
/// successful response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsVariables {
    pub cursor: Option<String>,
    pub per_page: i64,
    pub query: Option<String>,
}

/// Empty variables for queries that take none.
#[derive(Debug, Clone, Serialize)]
pub struct NoVariables {}

// =============================================================================
// Response data (raw wire shapes)
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ProductsData {
    pub products: ProductConnectionWire,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductConnectionWire {
    pub edges: Vec<ProductEdgeWire>,
    pub page_info: PageInfoWire,
}

#[derive(Debug, Deserialize)]
pub struct ProductEdgeWire {
    pub node: ProductNodeWire,
}

#[derive(Debug, Deserialize)]
pub struct ProductNodeWire {
    pub id: String,
    pub title: String,
    pub handle: String,
    pub description: String,
    pub variants: VariantConnectionWire,
    pub media: MediaConnectionWire,
}

#[derive(Debug, Deserialize)]
pub struct VariantConnectionWire {
    pub edges: Vec<VariantEdgeWire>,
}

#[derive(Debug, Deserialize)]
pub struct VariantEdgeWire {
    pub node: VariantNodeWire,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantNodeWire {
    pub id: String,
    pub price: String,
    pub compare_at_price: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MediaConnectionWire {
    pub edges: Vec<MediaEdgeWire>,
}

#[derive(Debug, Deserialize)]
pub struct MediaEdgeWire {
    pub node: MediaNodeWire,
}

/// Non-image media deserialize to an empty node (the inline fragment matches
/// nothing), so every field must be optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MediaNodeWire {
    pub id: Option<String>,
    pub image: Option<ImageWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageWire {
    pub url: String,
    pub alt_text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfoWire {
    pub has_previous_page: bool,
    pub has_next_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ShopData {
    pub shop: ShopWire,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopWire {
    pub name: String,
    pub email: String,
    pub myshopify_domain: String,
    pub primary_domain: PrimaryDomainWire,
}

#[derive(Debug, Deserialize)]
pub struct PrimaryDomainWire {
    pub url: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_products_variables_serialize_camel_case() {
        let vars = ProductsVariables {
            cursor: Some("abc".to_string()),
            per_page: 10,
            query: Some("title:*shirt*".to_string()),
        };
        let json = serde_json::to_value(&vars).unwrap();
        assert_eq!(json["cursor"], "abc");
        assert_eq!(json["perPage"], 10);
        assert_eq!(json["query"], "title:*shirt*");
    }

    #[test]
    fn test_products_variables_null_cursor_for_first_page() {
        let vars = ProductsVariables {
            cursor: None,
            per_page: 3,
            query: None,
        };
        let json = serde_json::to_value(&vars).unwrap();
        assert!(json["cursor"].is_null());
        assert!(json["query"].is_null());
    }

    #[test]
    fn test_query_documents_take_search_as_variable() {
        // The search term must be a declared variable, not interpolated text.
        for doc in [PRODUCTS_FORWARD_QUERY, PRODUCTS_BACKWARD_QUERY] {
            assert!(doc.contains("$query: String"));
            assert!(doc.contains("query: $query"));
        }
        assert!(PRODUCTS_FORWARD_QUERY.contains("first: $perPage, after: $cursor"));
        assert!(PRODUCTS_BACKWARD_QUERY.contains("last: $perPage, before: $cursor"));
    }

    #[test]
    fn test_page_info_wire_deserialize() {
        let json = r#"{
            "hasPreviousPage": false,
            "hasNextPage": true,
            "startCursor": "c1",
            "endCursor": "c3"
        }"#;
        let info: PageInfoWire = serde_json::from_str(json).unwrap();
        assert!(!info.has_previous_page);
        assert!(info.has_next_page);
        assert_eq!(info.start_cursor.as_deref(), Some("c1"));
        assert_eq!(info.end_cursor.as_deref(), Some("c3"));
    }

    #[test]
    fn test_media_node_wire_tolerates_non_image_media() {
        // Videos and 3D models match no fragment fields and arrive as {}
        let node: MediaNodeWire = serde_json::from_str("{}").unwrap();
        assert!(node.image.is_none());
    }
}
