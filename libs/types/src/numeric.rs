//! Fixed-point decimal types for prices and quantities
//!
//! Uses rust_decimal for deterministic arithmetic (no floating-point errors).
//! Whenever matching derives a quantity by division the result is truncated
//! toward zero at the book's scale, see [`div_truncate`].

use std::fmt;
use std::ops::{Add, Mul};
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::errors::NumericError;

/// Truncate `value` toward zero, keeping at most `scale` fractional digits.
pub fn truncate(value: Decimal, scale: u32) -> Decimal {
    value.round_dp_with_strategy(scale, RoundingStrategy::ToZero)
}

/// `numerator / denominator` truncated toward zero at `scale`.
///
/// A zero denominator yields zero.
pub fn div_truncate(numerator: Decimal, denominator: Decimal, scale: u32) -> Decimal {
    numerator
        .checked_div(denominator)
        .map(|quotient| truncate(quotient, scale))
        .unwrap_or(Decimal::ZERO)
}

/// Strictly positive price, quoted in the market's quote asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    pub fn try_new(value: Decimal) -> Result<Self, NumericError> {
        if value <= Decimal::ZERO {
            return Err(NumericError::NonPositivePrice(value.to_string()));
        }
        Ok(Self(value))
    }

    /// # Panics
    /// Panics on zero
    pub fn from_u64(value: u64) -> Self {
        assert!(value > 0, "Price must be positive");
        Self(Decimal::from(value))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl FromStr for Price {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str_exact(s)
            .map_err(|_| NumericError::InvalidDecimal(s.to_string()))?;
        Self::try_new(value)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-negative decimal amount
///
/// Usually a base-asset quantity. A market buy order stores its remaining
/// quote funds in the same type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(Decimal);

impl Quantity {
    pub fn try_new(value: Decimal) -> Result<Self, NumericError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(NumericError::NegativeQuantity(value.to_string()));
        }
        Ok(Self(value))
    }

    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn from_u64(value: u64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Subtract, clamping at zero
    pub fn saturating_sub(self, other: Quantity) -> Quantity {
        if other.0 >= self.0 {
            Self::zero()
        } else {
            Self(self.0 - other.0)
        }
    }

    /// Subtract a raw decimal, clamping at zero
    pub fn saturating_sub_decimal(self, other: Decimal) -> Quantity {
        if other >= self.0 {
            Self::zero()
        } else {
            Self(self.0 - other)
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::zero()
    }
}

impl Add for Quantity {
    type Output = Quantity;

    fn add(self, rhs: Quantity) -> Quantity {
        Quantity(self.0 + rhs.0)
    }
}

/// Quote value of a base quantity at a price
impl Mul<Price> for Quantity {
    type Output = Decimal;

    fn mul(self, rhs: Price) -> Decimal {
        self.0 * rhs.0
    }
}

impl FromStr for Quantity {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str_exact(s)
            .map_err(|_| NumericError::InvalidDecimal(s.to_string()))?;
        Self::try_new(value)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    #[test]
    fn test_truncate_rounds_toward_zero() {
        assert_eq!(truncate(dec("1.23456"), 4), dec("1.2345"));
        assert_eq!(truncate(dec("0.99999"), 2), dec("0.99"));
        assert_eq!(truncate(dec("-1.239"), 2), dec("-1.23"));
        assert_eq!(truncate(dec("7"), 3), dec("7"));
    }

    #[test]
    fn test_div_truncate() {
        // 1.04944 / 99.98 = 0.0104964...
        assert_eq!(div_truncate(dec("1.04944"), dec("99.98"), 4), dec("0.0104"));
        assert_eq!(div_truncate(dec("10"), dec("3"), 2), dec("3.33"));
        assert_eq!(div_truncate(dec("10"), Decimal::ZERO, 2), Decimal::ZERO);
    }

    #[test]
    fn test_price_must_be_positive() {
        assert!(Price::try_new(Decimal::ZERO).is_err());
        assert!(Price::try_new(dec("-5")).is_err());
        assert_eq!(Price::from_str("99.98").unwrap().as_decimal(), dec("99.98"));
        assert!(matches!(Price::from_str("abc"), Err(NumericError::InvalidDecimal(_))));
    }

    #[test]
    fn test_quantity_non_negative() {
        assert!(Quantity::try_new(dec("-0.1")).is_err());
        assert!(Quantity::try_new(Decimal::ZERO).unwrap().is_zero());
        assert_eq!(Quantity::from_str("1.5").unwrap(), Quantity::try_new(dec("1.5")).unwrap());
    }

    #[test]
    fn test_quantity_saturating_sub() {
        let a = Quantity::from_u64(10);
        let b = Quantity::from_u64(4);
        assert_eq!(a.saturating_sub(b), Quantity::from_u64(6));
        assert_eq!(b.saturating_sub(a), Quantity::zero());
        assert_eq!(a.saturating_sub_decimal(dec("2.5")), Quantity::from_str("7.5").unwrap());
    }

    #[test]
    fn test_quantity_times_price() {
        let value = Quantity::from_str("0.5").unwrap() * Price::from_u64(50000);
        assert_eq!(value, dec("25000"));
    }

    #[test]
    fn test_decimal_serializes_as_string() {
        let price = Price::from_str("3000.50").unwrap();
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "\"3000.50\"");
        let back: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(back, price);
    }
}
