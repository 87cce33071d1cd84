//! Health check handler

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// Health check endpoint
///
/// Always 200; a failing database probe is reported in the body, not as
/// an HTTP error.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = if infra_db::ping(&state.pool).await {
        "connected"
    } else {
        "disconnected"
    };

    Json(HealthResponse {
        status: "healthy",
        database,
        timestamp: Utc::now(),
    })
}
