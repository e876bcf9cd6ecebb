//! Account domain model.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use crate::error::LedgerError;

/// Sequential identifier for an Account, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(i64);

impl AccountId {
    /// Wraps a raw account number.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw account number.
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Returns the identifier that follows this one, or `None` once the
    /// sequence has reached `i64::MAX`.
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for AccountId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Phone number an account is registered under. Unique across accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    pub fn new(phone: impl Into<String>) -> Self {
        Self(phone.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Phone {
    fn from(phone: &str) -> Self {
        Self(phone.to_string())
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A user's balance-holding record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Sequential identifier
    pub id: AccountId,
    /// Registered phone number
    pub phone: Phone,
    /// Current balance in minor units, never left negative by the ledger
    pub balance: Money,
}

impl Account {
    /// Creates a new account with zero balance.
    pub fn new(id: AccountId, phone: Phone) -> Self {
        Self {
            id,
            phone,
            balance: Money::zero(),
        }
    }

    /// Creates an account with all fields specified (for file reconstruction).
    pub fn from_parts(id: AccountId, phone: Phone, balance: Money) -> Self {
        Self { id, phone, balance }
    }

    /// Credits (adds) money to the account. The balance saturates at
    /// `i64::MAX`; anything above that is dropped.
    pub fn credit(&mut self, amount: Money) {
        self.balance = self.balance.saturating_add(amount);
    }

    /// Debits (subtracts) money from the account.
    pub fn debit(&mut self, amount: Money) -> Result<(), LedgerError> {
        self.balance = self.balance.checked_sub(amount)?;
        Ok(())
    }
}
