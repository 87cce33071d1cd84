//! Payment handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use tracing::debug;

use crate::dto::payments::{CreatePaymentRequest, PaymentResponse};
use crate::error::ApiError;
use crate::handlers::orders::fetch_order;
use crate::AppState;
use core_kernel::PaymentId;
use domain_merchant::Merchant;
use domain_payment::Payment;

/// Creates a payment against an order owned by the authenticated merchant
pub async fn create_payment(
    State(state): State<AppState>,
    Extension(merchant): Extension<Merchant>,
    Json(request): Json<CreatePaymentRequest>,
) -> Result<(StatusCode, Json<PaymentResponse>), ApiError> {
    let order = fetch_order(&state, &request.order_id).await?;
    if !order.is_owned_by(&merchant.id) {
        return Err(ApiError::NotFound("Order"));
    }

    let payment = state
        .engine
        .create_payment(&order, request.instrument()?)
        .await?;
    Ok((StatusCode::CREATED, Json(PaymentResponse::from(payment))))
}

/// Creates a payment from the unauthenticated checkout path.
///
/// Possession of the order id is the only credential here; the caller's
/// relationship to the order's merchant is not verified, and there is no
/// rate limit or idempotency key.
pub async fn create_payment_public(
    State(state): State<AppState>,
    Json(request): Json<CreatePaymentRequest>,
) -> Result<(StatusCode, Json<PaymentResponse>), ApiError> {
    let order = fetch_order(&state, &request.order_id).await?;
    debug!(order_id = %order.id, "unauthenticated payment creation");

    let payment = state
        .engine
        .create_payment(&order, request.instrument()?)
        .await?;
    Ok((StatusCode::CREATED, Json(PaymentResponse::from(payment))))
}

/// Fetches a payment owned by the authenticated merchant
pub async fn get_payment(
    State(state): State<AppState>,
    Extension(merchant): Extension<Merchant>,
    Path(payment_id): Path<String>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let payment = fetch_payment(&state, &payment_id).await?;
    if payment.merchant_id != merchant.id {
        return Err(ApiError::NotFound("Payment"));
    }
    Ok(Json(PaymentResponse::from(payment)))
}

/// Fetches a payment for the checkout status poll, no auth
pub async fn get_payment_public(
    State(state): State<AppState>,
    Path(payment_id): Path<String>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let payment = fetch_payment(&state, &payment_id).await?;
    Ok(Json(PaymentResponse::from(payment)))
}

/// All payments of the authenticated merchant, newest first
pub async fn list_payments(
    State(state): State<AppState>,
    Extension(merchant): Extension<Merchant>,
) -> Result<Json<Vec<PaymentResponse>>, ApiError> {
    let payments = state.payments.list_for_merchant(&merchant.id).await?;
    Ok(Json(
        payments.into_iter().map(PaymentResponse::from).collect(),
    ))
}

async fn fetch_payment(state: &AppState, payment_id: &str) -> Result<Payment, ApiError> {
    let id: PaymentId = payment_id
        .parse()
        .map_err(|_| ApiError::NotFound("Payment"))?;
    state
        .payments
        .fetch(&id)
        .await?
        .ok_or(ApiError::NotFound("Payment"))
}
