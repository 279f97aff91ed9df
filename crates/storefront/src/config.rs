//! Catalog configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CATALOG_BASE_URL` - Catalog API origin (default: <https://dummyjson.com>)
//! - `CATALOG_CATEGORY` - Product category to list (default: motorcycle)
//! - `CATALOG_LIMIT` - Maximum number of products, 1-100 (default: 12)

use thiserror::Error;
use url::Url;

const DEFAULT_BASE_URL: &str = "https://dummyjson.com";
const DEFAULT_CATEGORY: &str = "motorcycle";
const DEFAULT_LIMIT: u16 = 12;
const MAX_LIMIT: u16 = 100;

/// Field projection requested from the catalog API.
pub const PRODUCT_FIELDS: &str = "id,thumbnail,title,price,description";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Catalog API configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Catalog API origin, without the `/products` path
    pub base_url: String,
    /// Category the storefront is restricted to
    pub category: String,
    /// Maximum number of products requested
    pub limit: u16,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            limit: DEFAULT_LIMIT,
        }
    }
}

impl CatalogConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = get_env_or_default(&lookup, "CATALOG_BASE_URL", DEFAULT_BASE_URL);
        let category = get_env_or_default(&lookup, "CATALOG_CATEGORY", DEFAULT_CATEGORY);
        if category.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "CATALOG_CATEGORY".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let limit = match get_optional_env(&lookup, "CATALOG_LIMIT") {
            Some(raw) => parse_limit(&raw)?,
            None => DEFAULT_LIMIT,
        };

        let config = Self {
            base_url,
            category,
            limit,
        };

        // Fail at startup rather than on the first fetch
        config.products_url()?;

        Ok(config)
    }

    /// Full URL of the product listing request.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `base_url` is not an absolute
    /// URL that can carry a path.
    pub fn products_url(&self) -> Result<Url, ConfigError> {
        let invalid =
            |reason: String| ConfigError::InvalidEnvVar("CATALOG_BASE_URL".to_string(), reason);

        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("cannot be used as a base URL".to_string()))?
            .pop_if_empty()
            .extend(["products", "category", self.category.as_str()]);
        url.query_pairs_mut()
            .append_pair("limit", &self.limit.to_string())
            .append_pair("select", PRODUCT_FIELDS);

        Ok(url)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional variable from the lookup.
fn get_optional_env(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
}

/// Get a variable from the lookup with a default value.
fn get_env_or_default(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> String {
    get_optional_env(lookup, key).unwrap_or_else(|| default.to_string())
}

/// Parse and bound-check `CATALOG_LIMIT`.
fn parse_limit(raw: &str) -> Result<u16, ConfigError> {
    let limit = raw
        .trim()
        .parse::<u16>()
        .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_LIMIT".to_string(), e.to_string()))?;

    if limit == 0 || limit > MAX_LIMIT {
        return Err(ConfigError::InvalidEnvVar(
            "CATALOG_LIMIT".to_string(),
            format!("must be between 1 and {MAX_LIMIT} (got {limit})"),
        ));
    }

    Ok(limit)
}
