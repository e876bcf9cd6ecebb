//! Domain models for the wallet ledger.

pub mod account;
pub mod favorite;
pub mod money;
pub mod payment;

pub use account::{Account, AccountId, Phone};
pub use favorite::{Favorite, FavoriteId};
pub use money::Money;
pub use payment::{Payment, PaymentCategory, PaymentId, PaymentStatus};
