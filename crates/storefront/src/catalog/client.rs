//! HTTP client for the catalog API.
//!
//! Uses `reqwest` for a single read-only GET per load. No caching and no
//! retries: the loader fetches once per lifetime.

use std::sync::Arc;

use tracing::{debug, error, instrument};
use url::Url;

use crate::catalog::types::{Product, ProductPage};
use crate::catalog::{CatalogError, ProductSource};
use crate::config::{CatalogConfig, ConfigError};

/// Maximum number of body characters copied into log events.
const LOG_BODY_LIMIT: usize = 500;

/// Client for the remote product catalog.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    products_url: Url,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configured base URL is invalid.
    pub fn new(config: &CatalogConfig) -> Result<Self, ConfigError> {
        let products_url = config.products_url()?;

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                products_url,
            }),
        })
    }

    /// URL the product listing is fetched from.
    #[must_use]
    pub fn products_url(&self) -> &Url {
        &self.inner.products_url
    }

    /// Fetch the product listing.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Http` if the request cannot be sent,
    /// `CatalogError::Status` for a non-success response, and
    /// `CatalogError::Parse` if the body is not a product listing.
    #[instrument(skip(self), fields(url = %self.inner.products_url))]
    pub async fn get_products(&self) -> Result<Vec<Product>, CatalogError> {
        let response = self
            .inner
            .client
            .get(self.inner.products_url.clone())
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            error!(
                status = %status,
                body = %truncate(&response_text),
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::Status(status));
        }

        let page: ProductPage = serde_json::from_str(&response_text).map_err(|e| {
            error!(
                error = %e,
                body = %truncate(&response_text),
                "Failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })?;

        debug!(count = page.products.len(), "Fetched catalog products");
        Ok(page.products)
    }
}

impl ProductSource for CatalogClient {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.get_products().await
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(LOG_BODY_LIMIT).collect()
}
