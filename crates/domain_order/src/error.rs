//! Order domain errors

use thiserror::Error;

/// Errors raised when creating or reading orders
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    #[error("amount must be at least {minimum}, got {amount}")]
    AmountBelowMinimum { amount: i64, minimum: i64 },

    #[error("amount must not be negative, got {0}")]
    NegativeAmount(i64),

    #[error("unsupported currency: {0}")]
    UnsupportedCurrency(String),

    #[error("unknown order status: {0}")]
    UnknownStatus(String),
}
