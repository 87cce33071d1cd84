//! Storage port for the payment engine
//!
//! The engine persists through this trait; the PostgreSQL adapter lives in
//! the infrastructure crate, and an in-memory implementation (behind the
//! `mock` feature) backs the lifecycle tests.

use async_trait::async_trait;
use thiserror::Error;

use crate::payment::Payment;
use core_kernel::PaymentId;

/// Errors surfaced by payment storage adapters
#[derive(Debug, Error)]
pub enum StoreError {
    /// The candidate id already exists; the caller should regenerate and retry
    #[error("payment id collision")]
    IdCollision,

    #[error("payment {0} not found")]
    NotFound(String),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Persistence operations the payment lifecycle needs
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Inserts a payment row in `processing` state.
    ///
    /// Implementations must enforce id uniqueness at the storage level and
    /// report a clash as [`StoreError::IdCollision`] rather than silently
    /// overwriting.
    async fn insert_processing(&self, payment: &Payment) -> Result<(), StoreError>;

    /// Writes the terminal state of a previously admitted payment.
    async fn mark_finalized(&self, payment: &Payment) -> Result<(), StoreError>;

    /// Fetches a payment by id.
    async fn fetch(&self, id: &PaymentId) -> Result<Payment, StoreError>;
}

#[cfg(any(test, feature = "mock"))]
pub mod mock {
    //! In-memory adapter for tests

    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// HashMap-backed payment store
    ///
    /// Uniqueness is enforced the same way the database adapter does it:
    /// by refusing a second insert under an existing key.
    #[derive(Debug, Default)]
    pub struct InMemoryPaymentStore {
        payments: Mutex<HashMap<PaymentId, Payment>>,
    }

    impl InMemoryPaymentStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn len(&self) -> usize {
            self.payments.lock().expect("store lock poisoned").len()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }
    }

    #[async_trait]
    impl PaymentStore for InMemoryPaymentStore {
        async fn insert_processing(&self, payment: &Payment) -> Result<(), StoreError> {
            let mut payments = self.payments.lock().expect("store lock poisoned");
            if payments.contains_key(&payment.id) {
                return Err(StoreError::IdCollision);
            }
            payments.insert(payment.id.clone(), payment.clone());
            Ok(())
        }

        async fn mark_finalized(&self, payment: &Payment) -> Result<(), StoreError> {
            let mut payments = self.payments.lock().expect("store lock poisoned");
            match payments.get_mut(&payment.id) {
                Some(stored) => {
                    *stored = payment.clone();
                    Ok(())
                }
                None => Err(StoreError::NotFound(payment.id.to_string())),
            }
        }

        async fn fetch(&self, id: &PaymentId) -> Result<Payment, StoreError> {
            self.payments
                .lock()
                .expect("store lock poisoned")
                .get(id)
                .cloned()
                .ok_or_else(|| StoreError::NotFound(id.to_string()))
        }
    }
}
