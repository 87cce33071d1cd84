//! Order Domain
//!
//! An order is the merchant-created anchor a payment settles against. The
//! core rule set is small: amounts are integer minor units of at least 100,
//! currency defaults to INR, and an order never changes after creation.

pub mod error;
pub mod order;

pub use error::OrderError;
pub use order::{NewOrder, Order, OrderStatus, MIN_ORDER_AMOUNT};
