//! In-memory shopping cart.
//!
//! [`CartState::reduce`] is the only way to change a cart: it takes the
//! current state, an action and the catalog snapshot, and returns the next
//! state. The running total is always derived from the line-items.
//!
//! # Invariants
//!
//! - At most one line-item per product ID.
//! - Every line-item has a quantity of at least 1; any action that would take
//!   it below 1 removes the line-item instead.
//! - Line-items keep the order in which they were first added.

mod action;

pub use action::{ActionParseError, CartAction};

use std::collections::HashSet;

use motoshop_core::{Price, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Product;

/// Errors that reject a cart action. The cart is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CartError {
    /// The product is not in the loaded catalog.
    #[error("Product not found in catalog: {0}")]
    ProductNotFound(ProductId),

    /// The cart has no line-item for the product.
    #[error("No cart line-item for product: {0}")]
    LineItemNotFound(ProductId),
}

/// Reasons a deserialized cart is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidCart {
    /// A line-item has a quantity below 1.
    #[error("Line-item for product {0} has quantity 0")]
    ZeroQuantity(ProductId),

    /// Two line-items share a product ID.
    #[error("Duplicate line-item for product: {0}")]
    DuplicateLineItem(ProductId),
}

/// One cart entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Product ID, unique within the cart.
    pub id: ProductId,
    pub thumbnail: String,
    pub title: String,
    /// Unit price copied from the catalog when the line-item was created.
    pub price: Price,
    pub quantity: u32,
}

impl CartLineItem {
    /// New line-item for `product` with quantity 1.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            thumbnail: product.thumbnail.clone(),
            title: product.title.clone(),
            price: product.price,
            quantity: 1,
        }
    }

    /// `price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// Ordered list of line-items.
///
/// Deserialization goes through the same invariant checks the reducer keeps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedCart")]
pub struct CartState {
    items: Vec<CartLineItem>,
}

/// Wire form of a cart before validation.
#[derive(Deserialize)]
struct UncheckedCart {
    items: Vec<CartLineItem>,
}

impl TryFrom<UncheckedCart> for CartState {
    type Error = InvalidCart;

    fn try_from(cart: UncheckedCart) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(cart.items.len());
        for item in &cart.items {
            if item.quantity < 1 {
                return Err(InvalidCart::ZeroQuantity(item.id));
            }
            if !seen.insert(item.id) {
                return Err(InvalidCart::DuplicateLineItem(item.id));
            }
        }
        Ok(Self { items: cart.items })
    }
}

impl CartState {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn line_item(&self, id: ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Running total: `Σ price × quantity` over all line-items.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Total number of units in the cart.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |count, item| count.saturating_add(item.quantity))
    }

    /// Compute the state that results from applying `action`.
    ///
    /// `catalog` is consulted only when a product is added for the first time.
    ///
    /// # Errors
    ///
    /// - `CartError::ProductNotFound` if a new line-item is needed and the
    ///   product is not in `catalog`.
    /// - `CartError::LineItemNotFound` if `UpdateQuantity` targets a product
    ///   that is not in the cart.
    pub fn reduce(&self, action: &CartAction, catalog: &[Product]) -> Result<Self, CartError> {
        let mut items = self.items.clone();

        match *action {
            CartAction::AddItem { id } => match position(&items, id) {
                Some(index) => adjust_quantity(&mut items, index, 1),
                None => items.push(new_line_item(id, catalog)?),
            },
            CartAction::SubtractItem { id } => match position(&items, id) {
                Some(index) => adjust_quantity(&mut items, index, -1),
                None => items.push(new_line_item(id, catalog)?),
            },
            CartAction::UpdateQuantity { id, amount } => {
                let index = position(&items, id).ok_or(CartError::LineItemNotFound(id))?;
                adjust_quantity(&mut items, index, i64::from(amount));
            }
        }

        Ok(Self { items })
    }
}

fn position(items: &[CartLineItem], id: ProductId) -> Option<usize> {
    items.iter().position(|item| item.id == id)
}

fn new_line_item(id: ProductId, catalog: &[Product]) -> Result<CartLineItem, CartError> {
    catalog
        .iter()
        .find(|product| product.id == id)
        .map(CartLineItem::from_product)
        .ok_or(CartError::ProductNotFound(id))
}

/// Shift the quantity at `index` by `delta`, removing the line-item below 1.
fn adjust_quantity(items: &mut Vec<CartLineItem>, index: usize, delta: i64) {
    let Some(current) = items.get(index).map(|item| item.quantity) else {
        return;
    };

    let next = i64::from(current) + delta;
    if next < 1 {
        items.remove(index);
    } else if let Some(item) = items.get_mut(index) {
        item.quantity = u32::try_from(next).unwrap_or(u32::MAX);
    }
}
