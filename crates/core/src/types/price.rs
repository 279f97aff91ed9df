//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices arrive as JSON numbers (`3999.99`), so [`Price`] accepts
//! numbers as well as decimal strings on the way in and always serializes as a
//! decimal string to avoid float rounding on the way out.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
}

/// A non-negative monetary amount in the store currency (USD).
///
/// ## Examples
///
/// ```
/// use motoshop_core::Price;
/// use rust_decimal::Decimal;
///
/// let price = Price::new(Decimal::new(1999, 2));
/// assert_eq!(price.to_string(), "$19.99");
/// assert_eq!(price.times(3).to_string(), "$59.97");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// A price of zero, the identity for summing totals.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    ///
    /// Negative amounts are clamped to zero; use [`Price::try_from`] to
    /// reject them instead.
    #[must_use]
    pub fn new(amount: Decimal) -> Self {
        Self(amount.max(Decimal::ZERO))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units, saturating at [`Decimal::MAX`].
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(
            self.0
                .checked_mul(Decimal::from(quantity))
                .unwrap_or(Decimal::MAX),
        )
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0.round_dp(2))
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.checked_add(rhs.0).unwrap_or(Decimal::MAX))
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_price_display_pads_to_cents() {
        assert_eq!(Price::new(Decimal::from(10)).to_string(), "$10.00");
        assert_eq!(Price::new(Decimal::new(39_9999, 2)).to_string(), "$3999.99");
    }

    #[test]
    fn test_price_times_quantity() {
        let price = Price::new(Decimal::new(250, 2));
        assert_eq!(price.times(4).amount(), Decimal::from(10));
        assert_eq!(price.times(0), Price::ZERO);
    }

    #[test]
    fn test_price_sum_is_numeric() {
        let total: Price = [
            Price::new(Decimal::from(10)),
            Price::new(Decimal::new(550, 2)),
        ]
        .into_iter()
        .sum();
        assert_eq!(total.amount(), Decimal::new(1550, 2));
    }

    #[test]
    fn test_price_new_clamps_negative() {
        assert_eq!(Price::new(Decimal::from(-5)), Price::ZERO);
    }

    #[test]
    fn test_price_try_from_rejects_negative() {
        let err = Price::try_from(Decimal::from(-1)).unwrap_err();
        assert_eq!(err, PriceError::Negative(Decimal::from(-1)));
        assert!(Price::try_from(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_price_deserializes_from_number_and_string() {
        let from_number: Price = serde_json::from_str("3999.99").unwrap();
        let from_string: Price = serde_json::from_str("\"3999.99\"").unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(from_number.amount(), Decimal::new(399_999, 2));
    }

    #[test]
    fn test_price_deserialize_rejects_negative() {
        assert!(serde_json::from_str::<Price>("-2.5").is_err());
    }

    #[test]
    fn test_price_serializes_as_string() {
        let json = serde_json::to_string(&Price::new(Decimal::new(1050, 2))).unwrap();
        assert_eq!(json, "\"10.50\"");
    }
}
