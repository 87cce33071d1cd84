//! Order DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{MerchantId, OrderId};
use domain_order::{NewOrder, Order, OrderStatus};

/// Request body for creating an order
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    /// Amount in minor units
    #[validate(range(min = 100, message = "amount must be at least 100"))]
    pub amount: i64,
    pub currency: Option<String>,
    pub receipt: Option<String>,
    pub notes: Option<serde_json::Map<String, serde_json::Value>>,
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(request: CreateOrderRequest) -> Self {
        NewOrder {
            amount: request.amount,
            currency: request.currency,
            receipt: request.receipt,
            notes: request.notes,
        }
    }
}

/// Full order view for the owning merchant
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: OrderId,
    pub merchant_id: MerchantId,
    pub amount: i64,
    pub currency: String,
    pub receipt: Option<String>,
    pub notes: serde_json::Map<String, serde_json::Value>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            merchant_id: order.merchant_id,
            amount: order.amount.minor_units(),
            currency: order.currency.code().to_string(),
            receipt: order.receipt,
            notes: order.notes,
            status: order.status,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

/// Reduced order view for the unauthenticated checkout page
#[derive(Debug, Serialize)]
pub struct PublicOrderResponse {
    pub id: OrderId,
    pub amount: i64,
    pub currency: String,
    pub status: OrderStatus,
    pub merchant_id: MerchantId,
    pub receipt: Option<String>,
    pub notes: serde_json::Map<String, serde_json::Value>,
}

impl From<Order> for PublicOrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            amount: order.amount.minor_units(),
            currency: order.currency.code().to_string(),
            status: order.status,
            merchant_id: order.merchant_id,
            receipt: order.receipt,
            notes: order.notes,
        }
    }
}
