//! Favorite payment template.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::account::AccountId;
use super::money::Money;
use super::payment::{Payment, PaymentCategory};

/// Opaque unique identifier for a Favorite.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteId(String);

impl FavoriteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FavoriteId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for FavoriteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named snapshot of a past payment, used to pay the same amount and
/// category again without re-entering them.
///
/// Favorites are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: FavoriteId,
    pub account_id: AccountId,
    /// User-chosen label
    pub name: String,
    pub amount: Money,
    pub category: PaymentCategory,
}

impl Favorite {
    /// Snapshots the account, amount and category of `payment`.
    pub fn from_payment(id: FavoriteId, payment: &Payment, name: impl Into<String>) -> Self {
        Self {
            id,
            account_id: payment.account_id,
            name: name.into(),
            amount: payment.amount,
            category: payment.category.clone(),
        }
    }
}
