//! # Wallet Service
//!
//! The ledger core of the wallet: an in-memory store of accounts, payments
//! and favorite payment templates, plus the operations that mutate it.
//!
//! ## Architecture
//!
//! - `service/` - `WalletService`, which owns the collections and enforces the invariants
//! - `config/` - Service configuration (reject policy)
//!
//! The service is generic over `G: IdGenerator`, allowing different
//! identifier sources to be injected. Flat-file persistence is delegated to
//! `wallet-repo`.

pub mod config;
pub mod service;


pub use config::{RejectPolicy, ServiceConfig};
pub use service::WalletService;
