//! Payment DTOs
//!
//! Responses are shaped per method: a UPI payment never exposes card
//! fields and a card payment never exposes `vpa`. The entity already
//! carries only its own method's fields, so skip-none serialization is
//! all the shaping that is needed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{MerchantId, OrderId, PaymentId};
use domain_payment::{
    CardInput, CardNetwork, Payment, PaymentInstrument, PaymentMethod, PaymentStatus,
};

use crate::error::ApiError;

/// Request body for creating a payment
#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    pub order_id: String,
    pub method: String,
    pub vpa: Option<String>,
    pub card: Option<CardRequest>,
}

/// Card credentials in a payment request
#[derive(Debug, Deserialize)]
pub struct CardRequest {
    pub number: String,
    pub expiry_month: u32,
    pub expiry_year: i32,
    pub cvv: String,
    pub holder_name: Option<String>,
}

impl From<CardRequest> for CardInput {
    fn from(card: CardRequest) -> Self {
        CardInput {
            number: card.number,
            expiry_month: card.expiry_month,
            expiry_year: card.expiry_year,
            cvv: card.cvv,
            holder_name: card.holder_name,
        }
    }
}

impl CreatePaymentRequest {
    /// Builds the instrument for the requested method.
    ///
    /// A missing VPA is an invalid VPA and a missing card object is an
    /// invalid card; an unrecognized method is a plain bad request.
    pub fn instrument(self) -> Result<PaymentInstrument, ApiError> {
        match self.method.parse::<PaymentMethod>().map_err(ApiError::from)? {
            PaymentMethod::Upi => Ok(PaymentInstrument::Upi {
                vpa: self.vpa.unwrap_or_default(),
            }),
            PaymentMethod::Card => {
                let card = self.card.ok_or(ApiError::InvalidCard)?;
                Ok(PaymentInstrument::Card { card: card.into() })
            }
        }
    }
}

/// Shaped payment view, common to merchant and public endpoints
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub id: PaymentId,
    pub order_id: OrderId,
    pub merchant_id: MerchantId,
    pub amount: i64,
    pub currency: String,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpa: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_network: Option<CardNetwork>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_last4: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            order_id: payment.order_id,
            merchant_id: payment.merchant_id,
            amount: payment.amount.minor_units(),
            currency: payment.currency.code().to_string(),
            method: payment.method,
            status: payment.status,
            vpa: payment.vpa,
            card_network: payment.card_network,
            card_last4: payment.card_last4,
            error_code: payment.error_code,
            error_description: payment.error_description,
            created_at: payment.created_at,
            updated_at: payment.updated_at,
        }
    }
}
