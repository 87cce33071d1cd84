//! API error handling
//!
//! Every error leaves the API as `{"error": {"code", "description"}}`.
//! Authentication and not-found deliberately carry one fixed description
//! each, whatever the underlying cause. Storage failures are logged and
//! collapse to a generic 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use domain_order::OrderError;
use domain_payment::PaymentError;
use infra_db::DatabaseError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid API credentials")]
    Authentication,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("VPA format invalid")]
    InvalidVpa,

    #[error("Card validation failed")]
    InvalidCard,

    #[error("Card expiry date invalid")]
    ExpiredCard,

    #[error("Internal error")]
    Internal(String),
}

/// Wire error envelope
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub description: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_)
            | ApiError::InvalidVpa
            | ApiError::InvalidCard
            | ApiError::ExpiredCard => StatusCode::BAD_REQUEST,
            ApiError::Authentication => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST_ERROR",
            ApiError::Authentication => "AUTHENTICATION_ERROR",
            ApiError::NotFound(_) => "NOT_FOUND_ERROR",
            ApiError::InvalidVpa => "INVALID_VPA",
            ApiError::InvalidCard => "INVALID_CARD",
            ApiError::ExpiredCard => "EXPIRED_CARD",
            ApiError::Internal(_) => "SERVER_ERROR",
        }
    }

    fn description(&self) -> String {
        match self {
            // Internals stay in the log, not on the wire.
            ApiError::Internal(_) => "Internal error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            error!(detail, "internal error surfaced to client");
        }
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code(),
                description: self.description(),
            },
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::InvalidVpa => ApiError::InvalidVpa,
            PaymentError::InvalidCard => ApiError::InvalidCard,
            PaymentError::ExpiredCard => ApiError::ExpiredCard,
            PaymentError::UnsupportedMethod(_) => {
                ApiError::BadRequest("Invalid payment method".to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}
