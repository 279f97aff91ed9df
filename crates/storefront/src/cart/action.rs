//! Cart actions.

use core::fmt;
use core::num::ParseIntError;
use core::str::FromStr;

use motoshop_core::ProductId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every way the cart can change.
///
/// The text form used by the CLI is `add:<id>`, `sub:<id>` or
/// `update:<id>:<amount>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartAction {
    /// Increment the line-item, or add the product with quantity 1.
    AddItem { id: ProductId },
    /// Decrement the line-item, or add the product with quantity 1.
    SubtractItem { id: ProductId },
    /// Shift the line-item's quantity by `amount`.
    UpdateQuantity { id: ProductId, amount: i32 },
}

impl CartAction {
    /// The product the action targets.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        match *self {
            Self::AddItem { id } | Self::SubtractItem { id } | Self::UpdateQuantity { id, .. } => id,
        }
    }
}

impl fmt::Display for CartAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddItem { id } => write!(f, "add:{id}"),
            Self::SubtractItem { id } => write!(f, "sub:{id}"),
            Self::UpdateQuantity { id, amount } => write!(f, "update:{id}:{amount}"),
        }
    }
}

/// Errors that can occur when parsing a [`CartAction`] from text.
#[derive(Debug, Error)]
pub enum ActionParseError {
    /// The action name is not `add`, `sub` or `update`.
    #[error("unknown cart action '{0}' (expected add, sub or update)")]
    UnknownAction(String),

    /// Wrong number of `:`-separated fields.
    #[error("malformed cart action '{0}'")]
    Malformed(String),

    /// An ID or amount is not an integer.
    #[error("invalid number in cart action '{input}': {source}")]
    InvalidNumber {
        input: String,
        #[source]
        source: ParseIntError,
    },
}

impl FromStr for CartAction {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number = |field: &str| {
            field
                .trim()
                .parse::<i32>()
                .map_err(|source| ActionParseError::InvalidNumber {
                    input: s.to_string(),
                    source,
                })
        };

        let parts: Vec<&str> = s.trim().split(':').collect();
        match parts.as_slice() {
            ["add", id] => Ok(Self::AddItem {
                id: ProductId::new(number(id)?),
            }),
            ["sub", id] => Ok(Self::SubtractItem {
                id: ProductId::new(number(id)?),
            }),
            ["update", id, amount] => Ok(Self::UpdateQuantity {
                id: ProductId::new(number(id)?),
                amount: number(amount)?,
            }),
            ["add" | "sub" | "update", ..] => Err(ActionParseError::Malformed(s.to_string())),
            [name, ..] => Err(ActionParseError::UnknownAction((*name).to_string())),
            [] => Err(ActionParseError::Malformed(s.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_actions() {
        assert_eq!(
            "add:1".parse::<CartAction>().unwrap(),
            CartAction::AddItem {
                id: ProductId::new(1)
            }
        );
        assert_eq!(
            "sub:7".parse::<CartAction>().unwrap(),
            CartAction::SubtractItem {
                id: ProductId::new(7)
            }
        );
        assert_eq!(
            "update:3:-2".parse::<CartAction>().unwrap(),
            CartAction::UpdateQuantity {
                id: ProductId::new(3),
                amount: -2
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "remove:1".parse::<CartAction>(),
            Err(ActionParseError::UnknownAction(name)) if name == "remove"
        ));
        assert!(matches!(
            "update:1".parse::<CartAction>(),
            Err(ActionParseError::Malformed(_))
        ));
        assert!(matches!(
            "add:one".parse::<CartAction>(),
            Err(ActionParseError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_display_matches_text_form() {
        let action = CartAction::UpdateQuantity {
            id: ProductId::new(4),
            amount: -1,
        };
        assert_eq!(action.to_string(), "update:4:-1");
        assert_eq!(action.id(), ProductId::new(4));
    }

    #[test]
    fn test_serde_uses_type_tag() {
        let json = serde_json::to_value(CartAction::AddItem {
            id: ProductId::new(2),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"type": "ADD_ITEM", "id": 2}));
    }
}
