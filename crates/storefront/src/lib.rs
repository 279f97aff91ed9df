//! Motoshop Storefront library.
//!
//! Loads the product catalog from the remote API and keeps the shopping cart
//! in memory. Everything is exposed through one controller, [`Storefront`],
//! and its read-only [`CartContext`] snapshot.
//!
//! # Modules
//!
//! - [`config`] - Catalog endpoint configuration from the environment
//! - [`catalog`] - HTTP client and the once-per-lifetime catalog loader
//! - [`cart`] - Cart actions and the reducer that applies them
//! - [`context`] - The controller and its snapshot
//! - [`error`] - Umbrella error type

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod context;
pub mod error;

pub use cart::{ActionParseError, CartAction, CartError, CartLineItem, CartState, InvalidCart};
pub use catalog::{
    CatalogClient, CatalogError, CatalogLoader, CatalogState, FETCH_FAILED_MESSAGE, LoadStatus,
    Product, ProductSource,
};
pub use config::{CatalogConfig, ConfigError};
pub use context::{CartContext, Storefront};
pub use error::{Result, StorefrontError};
