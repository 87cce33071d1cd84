//! Order entity and creation rules

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::OrderError;
use core_kernel::{Amount, AmountError, Currency, MerchantId, OrderId};

/// Smallest order amount the gateway accepts, in minor units.
pub const MIN_ORDER_AMOUNT: i64 = 100;

/// Order lifecycle status
///
/// Orders stay in `Created` for their whole life; settling a payment does
/// not advance the order. Nothing stops several successful payments against
/// one order as a consequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Created,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "created",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(OrderStatus::Created),
            other => Err(OrderError::UnknownStatus(other.to_string())),
        }
    }
}

/// Input for creating an order
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewOrder {
    /// Amount in minor units; must be an integer >= 100
    pub amount: i64,
    /// Optional ISO currency code, INR when absent
    pub currency: Option<String>,
    /// Merchant-supplied receipt reference
    pub receipt: Option<String>,
    /// Free-form key/value annotations
    pub notes: Option<serde_json::Map<String, serde_json::Value>>,
}

/// A merchant order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub merchant_id: MerchantId,
    pub amount: Amount,
    pub currency: Currency,
    pub receipt: Option<String>,
    pub notes: serde_json::Map<String, serde_json::Value>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Creates a new order for a merchant, enforcing the amount floor.
    ///
    /// The generated id is a candidate; the storage layer owns uniqueness
    /// and may ask for a regenerated one on conflict.
    pub fn create(merchant_id: MerchantId, input: NewOrder) -> Result<Self, OrderError> {
        if input.amount < MIN_ORDER_AMOUNT {
            if input.amount < 0 {
                return Err(OrderError::NegativeAmount(input.amount));
            }
            return Err(OrderError::AmountBelowMinimum {
                amount: input.amount,
                minimum: MIN_ORDER_AMOUNT,
            });
        }
        let amount = Amount::from_minor(input.amount).map_err(|e| match e {
            AmountError::Negative(n) => OrderError::NegativeAmount(n),
            _ => OrderError::NegativeAmount(input.amount),
        })?;
        let currency = match input.currency.as_deref() {
            None | Some("") => Currency::default(),
            Some(code) => code
                .parse()
                .map_err(|_| OrderError::UnsupportedCurrency(code.to_string()))?,
        };

        let now = Utc::now();
        Ok(Self {
            id: OrderId::generate(),
            merchant_id,
            amount,
            currency,
            receipt: input.receipt,
            notes: input.notes.unwrap_or_default(),
            status: OrderStatus::Created,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replaces the candidate id after a storage-level collision.
    pub fn with_regenerated_id(mut self) -> Self {
        self.id = OrderId::generate();
        self
    }

    /// True when the order belongs to the given merchant
    pub fn is_owned_by(&self, merchant_id: &MerchantId) -> bool {
        &self.merchant_id == merchant_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_order(amount: i64) -> NewOrder {
        NewOrder {
            amount,
            ..NewOrder::default()
        }
    }

    #[test]
    fn test_amount_99_rejected() {
        let err = Order::create(MerchantId::new(), new_order(99)).unwrap_err();
        assert_eq!(
            err,
            OrderError::AmountBelowMinimum {
                amount: 99,
                minimum: 100
            }
        );
    }

    #[test]
    fn test_amount_100_accepted_with_created_status() {
        let order = Order::create(MerchantId::new(), new_order(100)).unwrap();
        assert_eq!(order.status, OrderStatus::Created);
        assert_eq!(order.amount.minor_units(), 100);
    }

    #[test]
    fn test_negative_amount_rejected() {
        let err = Order::create(MerchantId::new(), new_order(-500)).unwrap_err();
        assert_eq!(err, OrderError::NegativeAmount(-500));
    }

    #[test]
    fn test_currency_defaults_to_inr() {
        let order = Order::create(MerchantId::new(), new_order(500)).unwrap();
        assert_eq!(order.currency, Currency::Inr);
    }

    #[test]
    fn test_explicit_currency_is_kept() {
        let input = NewOrder {
            amount: 500,
            currency: Some("USD".to_string()),
            ..NewOrder::default()
        };
        let order = Order::create(MerchantId::new(), input).unwrap();
        assert_eq!(order.currency, Currency::Usd);
    }

    #[test]
    fn test_unknown_currency_rejected() {
        let input = NewOrder {
            amount: 500,
            currency: Some("ZZZ".to_string()),
            ..NewOrder::default()
        };
        let err = Order::create(MerchantId::new(), input).unwrap_err();
        assert_eq!(err, OrderError::UnsupportedCurrency("ZZZ".to_string()));
    }

    #[test]
    fn test_ownership_check() {
        let merchant = MerchantId::new();
        let order = Order::create(merchant, new_order(500)).unwrap();
        assert!(order.is_owned_by(&merchant));
        assert!(!order.is_owned_by(&MerchantId::new()));
    }

    #[test]
    fn test_regenerated_id_differs() {
        let order = Order::create(MerchantId::new(), new_order(500)).unwrap();
        let original = order.id.clone();
        let regenerated = order.with_regenerated_id();
        assert_ne!(original, regenerated.id);
    }
}
