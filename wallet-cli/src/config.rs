//! Configuration loading from environment.

use std::env;
use std::path::PathBuf;

use wallet_service::RejectPolicy;

/// Runner configuration. Command-line flags take precedence over these values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub reject_policy: RejectPolicy,
    pub export_path: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let reject_policy = match lookup("WALLET_REJECT_POLICY") {
            Some(value) => value.parse()?,
            None => RejectPolicy::default(),
        };

        let export_path = lookup("WALLET_EXPORT_PATH")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            reject_policy,
            export_path,
        })
    }
}
