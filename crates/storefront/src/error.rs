//! Unified error handling.
//!
//! Each module owns its error enum; [`StorefrontError`] wraps them for callers
//! that drive several modules at once, such as the CLI.

use thiserror::Error;

use crate::cart::{ActionParseError, CartError};
use crate::catalog::CatalogError;
use crate::config::ConfigError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog API operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// A cart action was rejected.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// A cart action could not be parsed.
    #[error("Invalid action: {0}")]
    Action(#[from] ActionParseError),
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
