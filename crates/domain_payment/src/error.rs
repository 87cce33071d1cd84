//! Payment domain errors

use thiserror::Error;

use crate::ports::StoreError;

/// Errors raised while creating a payment
///
/// The three instrument variants map one-to-one onto the wire error codes
/// (`INVALID_VPA`, `INVALID_CARD`, `EXPIRED_CARD`). All of them are raised
/// before anything is persisted.
#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("VPA format invalid")]
    InvalidVpa,

    #[error("Card validation failed")]
    InvalidCard,

    #[error("Card expiry date invalid")]
    ExpiredCard,

    #[error("Invalid payment method: {0}")]
    UnsupportedMethod(String),

    #[error("unknown payment status: {0}")]
    UnknownStatus(String),

    #[error("payment {0} is already in a terminal state")]
    AlreadyFinalized(String),

    #[error("could not allocate a unique payment id")]
    IdExhausted,

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}
