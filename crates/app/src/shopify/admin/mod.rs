//! Shopify Admin API GraphQL client.
//!
//! Thin client over the Admin GraphQL endpoint. Requests are hand-authored
//! query documents plus typed variable structs; responses are decoded through
//! the `graphql_client` envelope.

use std::sync::Arc;

use graphql_client::{QueryBody, Response};
use secrecy::ExposeSecret;
use serde::{Serialize, de::DeserializeOwned};
use tracing::instrument;

use crate::config::ShopifyAdminConfig;
use crate::paging::{Direction, PageRequest, ProductSource};

use super::{
    AdminShopifyError, GraphQLError, GraphQLErrorLocation,
    types::{ProductConnection, Shop},
};

mod conversions;
pub mod queries;

use conversions::{convert_product_connection, convert_shop};
use queries::{
    NoVariables, PRODUCTS_BACKWARD_QUERY, PRODUCTS_FORWARD_QUERY, ProductsData,
    ProductsVariables, SHOP_QUERY, ShopData,
};

/// Shopify Admin API GraphQL client.
///
/// Provides access to the paginated product catalog and shop information.
///
/// # Security
///
/// This client carries an Admin API token with HIGH PRIVILEGE access to the
/// store. Deploy only behind trusted infrastructure.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
}

impl AdminClient {
    /// Create a new Admin API client.
    ///
    /// # Arguments
    ///
    /// * `config` - Shopify Admin API configuration
    #[must_use]
    pub fn new(config: &ShopifyAdminConfig) -> Self {
        let endpoint = format!(
            "https://{}/admin/api/{}/graphql.json",
            config.store, config.api_version
        );

        Self {
            inner: Arc::new(AdminClientInner {
                client: reqwest::Client::new(),
                endpoint,
                access_token: config.admin_token.expose_secret().to_string(),
            }),
        }
    }

    // =========================================================================
    // GraphQL Execution
    // =========================================================================

    /// Execute a GraphQL query.
    async fn execute<V, T>(
        &self,
        query: &'static str,
        variables: V,
    ) -> Result<T, AdminShopifyError>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let body = QueryBody {
            variables,
            query,
            operation_name: "",
        };

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .header("X-Shopify-Access-Token", &self.inner.access_token)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(AdminShopifyError::RateLimited(retry_after));
        }

        // Check for unauthorized
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AdminShopifyError::Unauthorized(
                "Invalid or expired access token".to_string(),
            ));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Shopify API returned non-success status"
            );
            return Err(AdminShopifyError::GraphQL(vec![GraphQLError {
                message: format!(
                    "HTTP {status}: {}",
                    response_text.chars().take(200).collect::<String>()
                ),
                locations: vec![],
                path: vec![],
            }]));
        }

        let response: Response<T> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse Shopify GraphQL response"
                );
                return Err(AdminShopifyError::Parse(e));
            }
        };

        // Check for GraphQL errors
        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            return Err(AdminShopifyError::GraphQL(
                errors
                    .into_iter()
                    .map(|e| GraphQLError {
                        message: e.message,
                        locations: e.locations.map_or_else(Vec::new, |locs| {
                            locs.into_iter()
                                .map(|l| GraphQLErrorLocation {
                                    line: i64::from(l.line),
                                    column: i64::from(l.column),
                                })
                                .collect()
                        }),
                        path: e.path.map_or_else(Vec::new, |p| {
                            p.into_iter()
                                .map(|fragment| match fragment {
                                    graphql_client::PathFragment::Key(s) => {
                                        serde_json::Value::String(s)
                                    }
                                    graphql_client::PathFragment::Index(i) => {
                                        serde_json::Value::Number(i.into())
                                    }
                                })
                                .collect()
                        }),
                    })
                    .collect(),
            ));
        }

        response.data.ok_or_else(|| {
            AdminShopifyError::GraphQL(vec![GraphQLError {
                message: "No data in response".to_string(),
                locations: vec![],
                path: vec![],
            }])
        })
    }

    // =========================================================================
    // Catalog methods
    // =========================================================================

    /// Get a page of the product catalog.
    ///
    /// Forward requests page after `request.cursor`; backward requests page
    /// before it. A `None` cursor fetches the first page.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self), fields(direction = ?request.direction, page_size = request.page_size))]
    pub async fn get_products(
        &self,
        request: &PageRequest,
    ) -> Result<ProductConnection, AdminShopifyError> {
        let query_doc = match request.direction {
            Direction::Forward => PRODUCTS_FORWARD_QUERY,
            Direction::Backward => PRODUCTS_BACKWARD_QUERY,
        };

        let variables = ProductsVariables {
            cursor: request.cursor.clone(),
            per_page: request.page_size,
            query: if request.search.is_empty() {
                None
            } else {
                Some(request.search.clone())
            },
        };

        let data: ProductsData = self.execute(query_doc, variables).await?;

        Ok(convert_product_connection(data.products))
    }

    // =========================================================================
    // Shop methods
    // =========================================================================

    /// Get basic information about the connected shop.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self))]
    pub async fn get_shop(&self) -> Result<Shop, AdminShopifyError> {
        let data: ShopData = self.execute(SHOP_QUERY, NoVariables {}).await?;

        Ok(convert_shop(data.shop))
    }
}

impl ProductSource for AdminClient {
    async fn fetch_page(
        &self,
        request: &PageRequest,
    ) -> Result<ProductConnection, AdminShopifyError> {
        self.get_products(request).await
    }
}
