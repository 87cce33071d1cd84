//! Settlement policy
//!
//! How long a payment sits in `processing` and whether it settles are
//! decisions of a [`SettlementPolicy`], injected into the engine at
//! construction. Production draws both from a random distribution;
//! deterministic test mode pins both, which is what keeps the lifecycle
//! tests free of timing flakiness.

use std::time::Duration;

use rand::Rng;

use crate::payment::PaymentMethod;

/// Decides settlement latency and outcome for a payment
pub trait SettlementPolicy: Send + Sync {
    /// How long the payment stays in `processing`
    fn delay_for(&self, method: PaymentMethod) -> Duration;

    /// Whether the payment settles successfully
    fn decide_outcome(&self, method: PaymentMethod) -> bool;
}

/// Production policy: uniformly random delay, weighted coin-flip outcome
#[derive(Debug, Clone)]
pub struct RandomSettlement {
    pub upi_success_rate: f64,
    pub card_success_rate: f64,
    pub min_delay: Duration,
    pub max_delay: Duration,
}

impl RandomSettlement {
    pub fn new(upi_success_rate: f64, card_success_rate: f64) -> Self {
        Self {
            upi_success_rate,
            card_success_rate,
            ..Self::default()
        }
    }

    fn rate_for(&self, method: PaymentMethod) -> f64 {
        match method {
            PaymentMethod::Upi => self.upi_success_rate,
            PaymentMethod::Card => self.card_success_rate,
        }
    }
}

impl Default for RandomSettlement {
    fn default() -> Self {
        Self {
            upi_success_rate: 0.90,
            card_success_rate: 0.95,
            min_delay: Duration::from_millis(5000),
            max_delay: Duration::from_millis(10000),
        }
    }
}

impl SettlementPolicy for RandomSettlement {
    fn delay_for(&self, _method: PaymentMethod) -> Duration {
        let (min, max) = (self.min_delay.min(self.max_delay), self.max_delay);
        rand::thread_rng().gen_range(min..=max)
    }

    fn decide_outcome(&self, method: PaymentMethod) -> bool {
        let rate = self.rate_for(method).clamp(0.0, 1.0);
        rand::thread_rng().gen_bool(rate)
    }
}

/// Deterministic test-mode policy: fixed delay, forced outcome
#[derive(Debug, Clone)]
pub struct FixedSettlement {
    pub outcome: bool,
    pub delay: Duration,
}

impl FixedSettlement {
    pub fn succeeding() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            outcome: false,
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Default for FixedSettlement {
    fn default() -> Self {
        Self {
            outcome: true,
            delay: Duration::from_millis(1000),
        }
    }
}

impl SettlementPolicy for FixedSettlement {
    fn delay_for(&self, _method: PaymentMethod) -> Duration {
        self.delay
    }

    fn decide_outcome(&self, _method: PaymentMethod) -> bool {
        self.outcome
    }
}
