//! Merchant Domain
//!
//! Merchants are the authenticated actors of the gateway. Each carries an
//! API key/secret pair checked on every private request; the pair is
//! seeded with the merchant record and never rotated through the API.

pub mod error;
pub mod merchant;

pub use error::MerchantError;
pub use merchant::{Merchant, SeedMerchant};
