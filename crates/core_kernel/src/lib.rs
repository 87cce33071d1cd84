//! Core Kernel - Foundational types for the payment gateway
//!
//! This crate provides the building blocks used across all domain modules:
//! - Monetary amounts in integer minor units (no floating point)
//! - Prefixed, randomly generated entity identifiers
//! - Common error types

pub mod error;
pub mod identifiers;
pub mod money;

pub use error::CoreError;
pub use identifiers::{IdParseError, MerchantId, OrderId, PaymentId};
pub use money::{Amount, AmountError, Currency};
