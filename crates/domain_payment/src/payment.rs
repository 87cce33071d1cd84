//! Payment entity and lifecycle
//!
//! A payment is admitted in `processing` and finalized exactly once into
//! `success` or `failed`. The raw instrument (full card number, CVV) is
//! consumed during validation and never reaches the entity; only the
//! derived fields (network, last four digits, VPA) are carried.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PaymentError;
use crate::validation::{
    card_network, validate_expiry_at, validate_luhn, validate_vpa, CardNetwork,
};
use core_kernel::{Amount, Currency, MerchantId, OrderId, PaymentId};
use domain_order::Order;

/// Error code attached to payments that fail settlement
pub const PAYMENT_FAILED_CODE: &str = "PAYMENT_FAILED";
/// Description attached alongside [`PAYMENT_FAILED_CODE`]
pub const PAYMENT_FAILED_DESCRIPTION: &str = "Payment processing failed";

/// Supported payment methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Upi,
    Card,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Upi => "upi",
            PaymentMethod::Card => "card",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upi" => Ok(PaymentMethod::Upi),
            "card" => Ok(PaymentMethod::Card),
            other => Err(PaymentError::UnsupportedMethod(other.to_string())),
        }
    }
}

/// Payment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Processing,
    Success,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Processing => "processing",
            PaymentStatus::Success => "success",
            PaymentStatus::Failed => "failed",
        }
    }

    /// True for `success` and `failed`; no transition leaves these states.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PaymentStatus::Processing)
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "processing" => Ok(PaymentStatus::Processing),
            "success" => Ok(PaymentStatus::Success),
            "failed" => Ok(PaymentStatus::Failed),
            other => Err(PaymentError::UnknownStatus(other.to_string())),
        }
    }
}

/// Raw card credentials as submitted by the payer
///
/// Held only for the duration of validation. The struct deliberately has
/// no `Serialize` impl so the full number and CVV cannot end up in a
/// response or log line by accident.
#[derive(Debug, Clone, Deserialize)]
pub struct CardInput {
    pub number: String,
    pub expiry_month: u32,
    pub expiry_year: i32,
    pub cvv: String,
    pub holder_name: Option<String>,
}

/// A payment instrument as submitted, before validation
#[derive(Debug, Clone)]
pub enum PaymentInstrument {
    Upi { vpa: String },
    Card { card: CardInput },
}

impl PaymentInstrument {
    /// Returns the wire method name of this instrument
    pub fn method(&self) -> PaymentMethod {
        match self {
            PaymentInstrument::Upi { .. } => PaymentMethod::Upi,
            PaymentInstrument::Card { .. } => PaymentMethod::Card,
        }
    }

    /// Validates the instrument and derives the persistable fields.
    ///
    /// Card numbers must pass Luhn before the expiry is checked, matching
    /// the order of the wire error codes. The full number and CVV are
    /// dropped here; only network and last four survive.
    pub fn validate(self, now: DateTime<Utc>) -> Result<ValidatedInstrument, PaymentError> {
        match self {
            PaymentInstrument::Upi { vpa } => {
                if !validate_vpa(&vpa) {
                    return Err(PaymentError::InvalidVpa);
                }
                Ok(ValidatedInstrument::Upi { vpa })
            }
            PaymentInstrument::Card { card } => {
                if !validate_luhn(&card.number) {
                    return Err(PaymentError::InvalidCard);
                }
                if !validate_expiry_at(card.expiry_month, card.expiry_year, now.year(), now.month())
                {
                    return Err(PaymentError::ExpiredCard);
                }
                let network = card_network(&card.number);
                let digits: String = card
                    .number
                    .chars()
                    .filter(|c| c.is_ascii_digit())
                    .collect();
                let last4 = digits[digits.len() - 4..].to_string();
                Ok(ValidatedInstrument::Card { network, last4 })
            }
        }
    }
}

/// The persistable outcome of instrument validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedInstrument {
    Upi { vpa: String },
    Card { network: CardNetwork, last4: String },
}

impl ValidatedInstrument {
    pub fn method(&self) -> PaymentMethod {
        match self {
            ValidatedInstrument::Upi { .. } => PaymentMethod::Upi,
            ValidatedInstrument::Card { .. } => PaymentMethod::Card,
        }
    }
}

/// A payment record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub order_id: OrderId,
    pub merchant_id: MerchantId,
    /// Copied from the parent order at admission
    pub amount: Amount,
    /// Copied from the parent order at admission
    pub currency: Currency,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    /// UPI only
    pub vpa: Option<String>,
    /// Card only
    pub card_network: Option<CardNetwork>,
    /// Card only
    pub card_last4: Option<String>,
    /// Set only when status is `failed`
    pub error_code: Option<String>,
    pub error_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    /// Admits a payment against an order in `processing` state.
    ///
    /// Amount and currency are copied from the order, which is the only
    /// place they are ever set.
    pub fn admit(order: &Order, instrument: ValidatedInstrument) -> Self {
        let method = instrument.method();
        let (vpa, network, last4) = match instrument {
            ValidatedInstrument::Upi { vpa } => (Some(vpa), None, None),
            ValidatedInstrument::Card { network, last4 } => (None, Some(network), Some(last4)),
        };
        let now = Utc::now();
        Self {
            id: PaymentId::generate(),
            order_id: order.id.clone(),
            merchant_id: order.merchant_id,
            amount: order.amount,
            currency: order.currency,
            method,
            status: PaymentStatus::Processing,
            vpa,
            card_network: network,
            card_last4: last4,
            error_code: None,
            error_description: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the candidate id after a storage-level collision.
    pub fn with_regenerated_id(mut self) -> Self {
        self.id = PaymentId::generate();
        self
    }

    /// Moves the payment to its terminal state.
    ///
    /// Fails if the payment is already terminal; the transition happens
    /// exactly once. Failure attaches the fixed error code/description,
    /// success clears both.
    pub fn finalize(&mut self, success: bool) -> Result<(), PaymentError> {
        if self.status.is_terminal() {
            return Err(PaymentError::AlreadyFinalized(self.id.to_string()));
        }
        if success {
            self.status = PaymentStatus::Success;
            self.error_code = None;
            self.error_description = None;
        } else {
            self.status = PaymentStatus::Failed;
            self.error_code = Some(PAYMENT_FAILED_CODE.to_string());
            self.error_description = Some(PAYMENT_FAILED_DESCRIPTION.to_string());
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}
