//! # Wallet Repository
//!
//! Persistence adapters for the wallet ledger.
//!
//! The ledger itself keeps everything in memory; this crate only knows how to
//! dump accounts to (and load them back from) a flat `ID;Phone;Balance` file.

pub mod flat_file;

pub use flat_file::{export_accounts, import_accounts, read_accounts, write_accounts};
