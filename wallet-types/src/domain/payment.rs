//! Payment domain model.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::account::AccountId;
use super::money::Money;

/// Opaque unique identifier for a Payment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(String);

impl PaymentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PaymentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-form tag describing what a payment was for (auto, pharmacy, restaurants...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentCategory(String);

impl PaymentCategory {
    pub fn new(category: impl Into<String>) -> Self {
        Self(category.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PaymentCategory {
    fn from(category: &str) -> Self {
        Self(category.to_string())
    }
}

impl fmt::Display for PaymentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle status of a payment.
///
/// The ledger only ever moves `InProgress` to `Fail`. `Ok` is set by an
/// outside settlement process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Fail")]
    Fail,
    #[serde(rename = "INPROGRESS")]
    InProgress,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Ok => write!(f, "OK"),
            PaymentStatus::Fail => write!(f, "Fail"),
            PaymentStatus::InProgress => write!(f, "INPROGRESS"),
        }
    }
}

/// A debit made against an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier
    pub id: PaymentId,
    /// Account the money was taken from
    pub account_id: AccountId,
    /// Amount debited
    pub amount: Money,
    pub category: PaymentCategory,
    pub status: PaymentStatus,
}

impl Payment {
    /// Creates a new payment in the `InProgress` state.
    pub fn new(
        id: PaymentId,
        account_id: AccountId,
        amount: Money,
        category: PaymentCategory,
    ) -> Self {
        Self {
            id,
            account_id,
            amount,
            category,
            status: PaymentStatus::InProgress,
        }
    }

    /// Copies this payment under a new identifier.
    ///
    /// The status is carried over unchanged, so repeating a failed payment
    /// yields another failed payment.
    pub fn duplicate(&self, id: PaymentId) -> Self {
        Self {
            id,
            account_id: self.account_id,
            amount: self.amount,
            category: self.category.clone(),
            status: self.status,
        }
    }

    pub fn is_in_progress(&self) -> bool {
        self.status == PaymentStatus::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_starts_in_progress() {
        let payment = Payment::new(
            PaymentId::from("p-1"),
            AccountId::new(1),
            Money::new(250),
            PaymentCategory::from("Coffee"),
        );
        assert_eq!(payment.status, PaymentStatus::InProgress);
        assert!(payment.is_in_progress());
    }

    #[test]
    fn test_duplicate_keeps_status() {
        let mut payment = Payment::new(
            PaymentId::from("p-1"),
            AccountId::new(3),
            Money::new(6855),
            PaymentCategory::from("Coffee"),
        );
        payment.status = PaymentStatus::Fail;

        let copy = payment.duplicate(PaymentId::from("p-2"));

        assert_eq!(copy.id.as_str(), "p-2");
        assert_eq!(copy.account_id, payment.account_id);
        assert_eq!(copy.amount, payment.amount);
        assert_eq!(copy.category, payment.category);
        assert_eq!(copy.status, PaymentStatus::Fail);
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&PaymentStatus::InProgress).unwrap(),
            "\"INPROGRESS\""
        );
        assert_eq!(serde_json::to_string(&PaymentStatus::Ok).unwrap(), "\"OK\"");
        assert_eq!(PaymentStatus::Fail.to_string(), "Fail");
    }
}
