//! Payment Domain
//!
//! The one component of the gateway with temporal behavior. A payment moves
//! through exactly three states:
//!
//! ```text
//!   validate ──> processing ──sleep──> success
//!                    │                    ▲
//!                    └────────────────> failed
//! ```
//!
//! The split between admission (a persisted `processing` row) and
//! finalization (exactly one transition to a terminal state) mirrors the
//! pending/terminal structure of real payment-network integrations; here
//! the second phase is decided by an injected [`SettlementPolicy`] instead
//! of an acquirer response.
//!
//! Instrument validation (VPA syntax, Luhn, card network, expiry) lives in
//! [`validation`] as pure functions with no I/O.

pub mod engine;
pub mod error;
pub mod payment;
pub mod ports;
pub mod settlement;
pub mod validation;

pub use engine::{PaymentEngine, MAX_ID_ATTEMPTS};
pub use error::PaymentError;
pub use payment::{
    CardInput, Payment, PaymentInstrument, PaymentMethod, PaymentStatus, ValidatedInstrument,
    PAYMENT_FAILED_CODE, PAYMENT_FAILED_DESCRIPTION,
};
pub use ports::{PaymentStore, StoreError};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::InMemoryPaymentStore;
pub use settlement::{FixedSettlement, RandomSettlement, SettlementPolicy};
pub use validation::{card_network, validate_expiry, validate_luhn, validate_vpa, CardNetwork};
