//! Merchant domain errors

use thiserror::Error;

/// Errors raised by merchant operations
///
/// Authentication intentionally collapses every failure cause into one
/// variant so callers cannot distinguish a wrong key from a wrong secret
/// or a missing record.
#[derive(Debug, Error)]
pub enum MerchantError {
    #[error("Invalid API credentials")]
    InvalidCredentials,

    #[error("Merchant is deactivated")]
    Inactive,
}
