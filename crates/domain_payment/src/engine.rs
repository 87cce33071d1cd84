//! Payment lifecycle engine
//!
//! Runs the validate / admit / suspend / resolve / finalize sequence for a
//! single payment. The suspension is a tokio timer, so a payment waiting
//! out its settlement delay never blocks other requests; within one
//! payment the steps are strictly sequential.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::PaymentError;
use crate::payment::{Payment, PaymentInstrument};
use crate::ports::{PaymentStore, StoreError};
use crate::settlement::SettlementPolicy;
use domain_order::Order;

/// Bound on insert retries when a generated payment id collides.
///
/// A collision needs two 62^16 draws to coincide, so a second attempt is
/// already vanishingly unlikely; the bound exists so a broken storage
/// layer cannot spin the loop forever.
pub const MAX_ID_ATTEMPTS: u32 = 5;

/// The payment lifecycle engine
///
/// Holds the storage port and the settlement policy; both are injected so
/// tests can run against an in-memory store with a pinned outcome.
pub struct PaymentEngine {
    store: Arc<dyn PaymentStore>,
    policy: Arc<dyn SettlementPolicy>,
}

impl PaymentEngine {
    pub fn new(store: Arc<dyn PaymentStore>, policy: Arc<dyn SettlementPolicy>) -> Self {
        Self { store, policy }
    }

    /// Creates a payment against an order and drives it to a terminal state.
    ///
    /// Validation failures return before anything is persisted. Once the
    /// `processing` row is written the method always finalizes it within
    /// the same call; there is no path that leaves a payment stuck.
    pub async fn create_payment(
        &self,
        order: &Order,
        instrument: PaymentInstrument,
    ) -> Result<Payment, PaymentError> {
        let method = instrument.method();

        // 1. Validate; nothing exists yet on failure.
        let validated = instrument.validate(Utc::now())?;

        // 2. Admit as processing. Uniqueness lives in the store; on a
        //    collision we regenerate the id and try again, bounded.
        let mut payment = Payment::admit(order, validated);
        let mut attempts = 0;
        loop {
            match self.store.insert_processing(&payment).await {
                Ok(()) => break,
                Err(StoreError::IdCollision) => {
                    attempts += 1;
                    if attempts >= MAX_ID_ATTEMPTS {
                        warn!(order_id = %order.id, attempts, "payment id space exhausted");
                        return Err(PaymentError::IdExhausted);
                    }
                    debug!(payment_id = %payment.id, "payment id collision, regenerating");
                    payment = payment.with_regenerated_id();
                }
                Err(other) => return Err(other.into()),
            }
        }
        debug!(payment_id = %payment.id, %method, "payment admitted as processing");

        // 3. Simulated settlement latency; cooperative, never blocking.
        tokio::time::sleep(self.policy.delay_for(method)).await;

        // 4.-5. Resolve and finalize.
        let success = self.policy.decide_outcome(method);
        payment.finalize(success)?;
        self.store.mark_finalized(&payment).await?;

        info!(
            payment_id = %payment.id,
            order_id = %order.id,
            status = %payment.status,
            "payment finalized"
        );
        Ok(payment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payment::{CardInput, PaymentStatus};
    use crate::ports::mock::InMemoryPaymentStore;
    use crate::settlement::FixedSettlement;
    use core_kernel::MerchantId;
    use domain_order::NewOrder;

    fn order() -> Order {
        Order::create(
            MerchantId::new(),
            NewOrder {
                amount: 500,
                ..NewOrder::default()
            },
        )
        .unwrap()
    }

    fn engine(store: Arc<InMemoryPaymentStore>, policy: FixedSettlement) -> PaymentEngine {
        PaymentEngine::new(store, Arc::new(policy))
    }

    fn upi() -> PaymentInstrument {
        PaymentInstrument::Upi {
            vpa: "payer@bank".to_string(),
        }
    }

    fn card() -> PaymentInstrument {
        PaymentInstrument::Card {
            card: CardInput {
                number: "4111111111111111".to_string(),
                expiry_month: 12,
                expiry_year: 2099,
                cvv: "123".to_string(),
                holder_name: None,
            },
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_forced_success_reaches_success() {
        let store = Arc::new(InMemoryPaymentStore::new());
        let engine = engine(store.clone(), FixedSettlement::succeeding());

        let payment = engine.create_payment(&order(), upi()).await.unwrap();

        assert_eq!(payment.status, PaymentStatus::Success);
        assert!(payment.error_code.is_none());
        let stored = store.fetch(&payment.id).await.unwrap();
        assert_eq!(stored.status, PaymentStatus::Success);
    }

    #[tokio::test(start_paused = true)]
    async fn test_forced_failure_reaches_failed_with_error_code() {
        let store = Arc::new(InMemoryPaymentStore::new());
        let engine = engine(store.clone(), FixedSettlement::failing());

        let payment = engine.create_payment(&order(), card()).await.unwrap();

        assert_eq!(payment.status, PaymentStatus::Failed);
        assert_eq!(payment.error_code.as_deref(), Some("PAYMENT_FAILED"));
        assert!(payment.error_description.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_validation_failure_persists_nothing() {
        let store = Arc::new(InMemoryPaymentStore::new());
        let engine = engine(store.clone(), FixedSettlement::succeeding());

        let err = engine
            .create_payment(
                &order(),
                PaymentInstrument::Upi {
                    vpa: "not-a-vpa".to_string(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::InvalidVpa));
        assert!(store.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_upi_payment_carries_vpa_and_no_card_fields() {
        let store = Arc::new(InMemoryPaymentStore::new());
        let engine = engine(store, FixedSettlement::succeeding());

        let payment = engine.create_payment(&order(), upi()).await.unwrap();

        assert_eq!(payment.vpa.as_deref(), Some("payer@bank"));
        assert!(payment.card_network.is_none());
        assert!(payment.card_last4.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_card_payment_carries_derived_fields_only() {
        let store = Arc::new(InMemoryPaymentStore::new());
        let engine = engine(store, FixedSettlement::succeeding());

        let payment = engine.create_payment(&order(), card()).await.unwrap();

        assert!(payment.vpa.is_none());
        assert_eq!(payment.card_last4.as_deref(), Some("1111"));
        assert_eq!(
            payment.card_network,
            Some(crate::validation::CardNetwork::Visa)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_amount_and_currency_copied_from_order() {
        let store = Arc::new(InMemoryPaymentStore::new());
        let engine = engine(store, FixedSettlement::succeeding());
        let order = order();

        let payment = engine.create_payment(&order, upi()).await.unwrap();

        assert_eq!(payment.amount, order.amount);
        assert_eq!(payment.currency, order.currency);
    }

    /// Store wrapper that reports an id collision for the first N inserts.
    struct CollidingStore {
        inner: InMemoryPaymentStore,
        collisions_left: std::sync::atomic::AtomicU32,
    }

    impl CollidingStore {
        fn new(collisions: u32) -> Self {
            Self {
                inner: InMemoryPaymentStore::new(),
                collisions_left: std::sync::atomic::AtomicU32::new(collisions),
            }
        }
    }

    #[async_trait::async_trait]
    impl crate::ports::PaymentStore for CollidingStore {
        async fn insert_processing(&self, payment: &Payment) -> Result<(), StoreError> {
            use std::sync::atomic::Ordering;
            if self
                .collisions_left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                return Err(StoreError::IdCollision);
            }
            self.inner.insert_processing(payment).await
        }

        async fn mark_finalized(&self, payment: &Payment) -> Result<(), StoreError> {
            self.inner.mark_finalized(payment).await
        }

        async fn fetch(&self, id: &core_kernel::PaymentId) -> Result<Payment, StoreError> {
            self.inner.fetch(id).await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_id_collisions_are_retried_with_fresh_ids() {
        let store = Arc::new(CollidingStore::new(2));
        let engine = PaymentEngine::new(store.clone(), Arc::new(FixedSettlement::succeeding()));

        let payment = engine.create_payment(&order(), upi()).await.unwrap();

        assert_eq!(payment.status, PaymentStatus::Success);
        assert_eq!(store.inner.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_id_retries_give_up() {
        let store = Arc::new(CollidingStore::new(MAX_ID_ATTEMPTS));
        let engine = PaymentEngine::new(store.clone(), Arc::new(FixedSettlement::succeeding()));

        let err = engine.create_payment(&order(), upi()).await.unwrap_err();

        assert!(matches!(err, PaymentError::IdExhausted));
        assert!(store.inner.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_payments_do_not_serialize_on_the_delay() {
        use std::time::Duration;

        let store = Arc::new(InMemoryPaymentStore::new());
        let engine = Arc::new(engine(
            store.clone(),
            FixedSettlement::succeeding().with_delay(Duration::from_millis(1000)),
        ));
        let order = order();

        let started = tokio::time::Instant::now();
        let a = tokio::spawn({
            let engine = engine.clone();
            let order = order.clone();
            async move { engine.create_payment(&order, upi()).await }
        });
        let b = tokio::spawn({
            let engine = engine.clone();
            let order = order.clone();
            async move { engine.create_payment(&order, card()).await }
        });

        let (a, b) = tokio::join!(a, b);
        a.unwrap().unwrap();
        b.unwrap().unwrap();

        // Two 1s delays overlap under the paused clock; sequential
        // execution would need 2s of virtual time.
        assert!(started.elapsed() < Duration::from_millis(1500));
        assert_eq!(store.len(), 2);
    }
}
