//! Order handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use crate::dto::orders::{CreateOrderRequest, OrderResponse, PublicOrderResponse};
use crate::error::ApiError;
use crate::AppState;
use core_kernel::OrderId;
use domain_merchant::Merchant;
use domain_order::Order;

/// Creates an order for the authenticated merchant
pub async fn create_order(
    State(state): State<AppState>,
    Extension(merchant): Extension<Merchant>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    request
        .validate()
        .map_err(|_| ApiError::BadRequest("amount must be at least 100".to_string()))?;

    // The domain check is authoritative; the DTO validation only exists
    // to fail fast with the wire message.
    let order = Order::create(merchant.id, request.into())?;
    let stored = state.orders.create(order).await?;

    Ok((StatusCode::CREATED, Json(OrderResponse::from(stored))))
}

/// Fetches an order owned by the authenticated merchant.
///
/// A missing order and someone else's order are indistinguishable: both
/// are 404.
pub async fn get_order(
    State(state): State<AppState>,
    Extension(merchant): Extension<Merchant>,
    Path(order_id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = fetch_order(&state, &order_id).await?;
    if !order.is_owned_by(&merchant.id) {
        return Err(ApiError::NotFound("Order"));
    }
    Ok(Json(OrderResponse::from(order)))
}

/// Fetches the reduced order view for the checkout page, no auth
pub async fn get_order_public(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<PublicOrderResponse>, ApiError> {
    let order = fetch_order(&state, &order_id).await?;
    Ok(Json(PublicOrderResponse::from(order)))
}

/// Shared lookup; a malformed id cannot name an order, so it is a 404
/// rather than a 400.
pub(crate) async fn fetch_order(state: &AppState, order_id: &str) -> Result<Order, ApiError> {
    let id: OrderId = order_id.parse().map_err(|_| ApiError::NotFound("Order"))?;
    state
        .orders
        .fetch(&id)
        .await?
        .ok_or(ApiError::NotFound("Order"))
}
