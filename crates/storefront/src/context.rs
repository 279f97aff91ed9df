//! The storefront controller and the snapshot it exposes.
//!
//! [`Storefront`] owns the catalog loader and the cart. Consumers read
//! [`CartContext`] snapshots and change the cart only through dispatch.
//!
//! # Example
//!
//! ```rust,ignore
//! use motoshop_storefront::{CatalogConfig, Storefront};
//!
//! let mut storefront = Storefront::from_config(&CatalogConfig::from_env()?)?;
//! storefront.load_catalog().await;
//!
//! storefront.add_item_to_cart(ProductId::new(167))?;
//! storefront.update_item_quantity(ProductId::new(167), 2)?;
//!
//! let ctx = storefront.snapshot();
//! println!("{} items, total {}", ctx.items.len(), ctx.total);
//! ```

use motoshop_core::{Price, ProductId};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::cart::{CartAction, CartError, CartLineItem, CartState};
use crate::catalog::{
    CatalogClient, CatalogLoader, CatalogState, LoadStatus, Product, ProductSource,
};
use crate::config::{CatalogConfig, ConfigError};

/// Read-only view of the catalog and cart handed to consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartContext {
    pub items: Vec<CartLineItem>,
    pub products: Vec<Product>,
    pub loading: bool,
    pub error: Option<String>,
    /// Running total of the cart.
    #[serde(rename = "valorTotal")]
    pub total: Price,
}

impl From<(&CatalogState, &CartState)> for CartContext {
    fn from((catalog, cart): (&CatalogState, &CartState)) -> Self {
        Self {
            items: cart.items().to_vec(),
            products: catalog.products().to_vec(),
            loading: catalog.is_loading(),
            error: catalog.error().map(str::to_string),
            total: cart.total(),
        }
    }
}

/// Single owner of the catalog and the cart.
pub struct Storefront<S> {
    catalog: CatalogLoader<S>,
    cart: CartState,
}

impl Storefront<CatalogClient> {
    /// Storefront backed by the HTTP catalog client.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the catalog URL is invalid.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(CatalogClient::new(config)?))
    }
}

impl<S: ProductSource> Storefront<S> {
    /// Create a storefront with an empty cart and an idle catalog.
    pub fn new(source: S) -> Self {
        Self {
            catalog: CatalogLoader::new(source),
            cart: CartState::new(),
        }
    }

    /// Fetch the catalog. Only the first call performs a request.
    ///
    /// Takes `&self`, so [`Storefront::snapshot`] can be read while the fetch
    /// is pending and reports `loading: true`.
    pub async fn load_catalog(&self) -> LoadStatus {
        self.catalog.load().await
    }

    /// Current catalog state. Do not hold the guard across an `.await`.
    #[must_use]
    pub fn catalog(&self) -> watch::Ref<'_, CatalogState> {
        self.catalog.state()
    }

    /// Receiver notified whenever the catalog state changes.
    #[must_use]
    pub fn subscribe_catalog(&self) -> watch::Receiver<CatalogState> {
        self.catalog.subscribe()
    }

    #[must_use]
    pub const fn cart(&self) -> &CartState {
        &self.cart
    }

    /// Apply `action` to the cart.
    ///
    /// # Errors
    ///
    /// Returns the `CartError` from [`CartState::reduce`]; the cart is left
    /// unchanged.
    pub fn dispatch(&mut self, action: CartAction) -> Result<(), CartError> {
        let result = {
            let catalog = self.catalog.state();
            self.cart.reduce(&action, catalog.products())
        };
        match result {
            Ok(next) => {
                self.cart = next;
                debug!(
                    action = %action,
                    lines = self.cart.items().len(),
                    total = %self.cart.total(),
                    "Cart updated"
                );
                Ok(())
            }
            Err(e) => {
                warn!(action = %action, error = %e, "Cart action rejected");
                Err(e)
            }
        }
    }

    /// Add one unit of `id`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ProductNotFound` if `id` is new to the cart and not
    /// in the catalog.
    pub fn add_item_to_cart(&mut self, id: ProductId) -> Result<(), CartError> {
        self.dispatch(CartAction::AddItem { id })
    }

    /// Remove one unit of `id`, or add it if it is not in the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ProductNotFound` if `id` is new to the cart and not
    /// in the catalog.
    pub fn sub_item_to_cart(&mut self, id: ProductId) -> Result<(), CartError> {
        self.dispatch(CartAction::SubtractItem { id })
    }

    /// Shift the quantity of `id` by `amount`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::LineItemNotFound` if `id` is not in the cart.
    pub fn update_item_quantity(&mut self, id: ProductId, amount: i32) -> Result<(), CartError> {
        self.dispatch(CartAction::UpdateQuantity { id, amount })
    }

    /// Current catalog and cart as one value.
    #[must_use]
    pub fn snapshot(&self) -> CartContext {
        CartContext::from((&*self.catalog.state(), &self.cart))
    }
}
