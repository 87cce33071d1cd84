//! Merchant handlers

use axum::{extract::State, Json};

use crate::dto::merchants::TestMerchantResponse;
use crate::error::ApiError;
use crate::AppState;

/// Returns the seeded test merchant's identity and credentials.
///
/// Exists so the demo front-ends can sign themselves in without manual
/// credential plumbing; it serves the merchant matching the configured
/// seed email.
pub async fn get_test_merchant(
    State(state): State<AppState>,
) -> Result<Json<TestMerchantResponse>, ApiError> {
    let merchant = state
        .merchants
        .find_by_email(&state.config.test_merchant_email)
        .await?
        .ok_or(ApiError::NotFound("Test merchant"))?;

    Ok(Json(TestMerchantResponse::from(merchant)))
}
