//! Monetary value in minor units.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::LedgerError;

/// Money stored in the smallest unit of the currency (cents, dirams, etc.)
/// to avoid floating-point precision issues.
///
/// The value is signed: a negative amount can be constructed so that
/// operations are able to reject it with [`LedgerError::AmountMustBePositive`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a new Money value.
    pub const fn new(amount: i64) -> Self {
        Self(amount)
    }

    /// Creates a zero-value Money.
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Returns the amount in minor units.
    pub fn amount(&self) -> i64 {
        self.0
    }

    /// Returns true for amounts below zero.
    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Saturating addition.
    pub fn saturating_add(&self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    /// Checked subtraction - returns an error if the result would be negative.
    pub fn checked_sub(&self, other: Money) -> Result<Money, LedgerError> {
        if self.0 < other.0 {
            return Err(LedgerError::NotEnoughBalance);
        }
        Ok(Money(self.0 - other.0))
    }
}

impl std::str::FromStr for Money {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_creation() {
        let money = Money::new(1000);
        assert_eq!(money.amount(), 1000);
        assert!(!money.is_negative());
        assert!(Money::new(-1).is_negative());
        assert!(!Money::zero().is_negative());
    }

    #[test]
    fn test_money_subtraction() {
        let balance = Money::new(500);
        assert_eq!(balance.checked_sub(Money::new(200)).unwrap(), Money::new(300));
        assert_eq!(balance.checked_sub(Money::new(500)).unwrap(), Money::zero());
    }

    #[test]
    fn test_money_subtraction_below_zero_fails() {
        let result = Money::new(100).checked_sub(Money::new(101));
        assert_eq!(result, Err(LedgerError::NotEnoughBalance));
    }

    #[test]
    fn test_money_addition_saturates() {
        let sum = Money::new(i64::MAX).saturating_add(Money::new(1));
        assert_eq!(sum.amount(), i64::MAX);
    }

    #[test]
    fn test_money_display_is_minor_units() {
        assert_eq!(Money::new(1050).to_string(), "1050");
        assert_eq!(Money::new(-7).to_string(), "-7");
    }

    #[test]
    fn test_money_parse() {
        assert_eq!(" 42 ".parse::<Money>().unwrap(), Money::new(42));
        assert!("4.2".parse::<Money>().is_err());
    }
}
