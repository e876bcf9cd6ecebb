//! Unique-ID generator port.
//!
//! Payments and favorites are keyed by opaque strings. Any source of
//! collision-free strings can back them.

use uuid::Uuid;

/// Port trait for unique identifier sources.
pub trait IdGenerator {
    /// Returns a string that has never been returned before.
    fn generate(&self) -> String;
}

/// Default adapter producing random UUID v4 strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for &G {
    fn generate(&self) -> String {
        (**self).generate()
    }
}
