//! Port traits (interfaces for adapters).
//!
//! These are the contracts that collaborators must implement.
//! The ledger service depends on these traits, not concrete implementations.

mod id_generator;

pub use id_generator::{IdGenerator, UuidGenerator};
