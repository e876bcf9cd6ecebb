//! Ledger service configuration.

use std::fmt;
use std::str::FromStr;

/// How `reject` treats payments that are no longer in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RejectPolicy {
    /// Any payment can be rejected, any number of times. Every call flips the
    /// status to `Fail` and refunds the amount again.
    #[default]
    Permissive,
    /// Only `InProgress` payments can be rejected.
    Strict,
}

impl fmt::Display for RejectPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectPolicy::Permissive => write!(f, "permissive"),
            RejectPolicy::Strict => write!(f, "strict"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown reject policy: {0}. Supported: permissive, strict")]
pub struct ParsePolicyError(String);

impl FromStr for RejectPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "permissive" => Ok(RejectPolicy::Permissive),
            "strict" => Ok(RejectPolicy::Strict),
            _ => Err(ParsePolicyError(s.to_string())),
        }
    }
}

/// Service configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServiceConfig {
    pub reject_policy: RejectPolicy,
}

impl ServiceConfig {
    pub fn with_reject_policy(mut self, reject_policy: RejectPolicy) -> Self {
        self.reject_policy = reject_policy;
        self
    }
}
