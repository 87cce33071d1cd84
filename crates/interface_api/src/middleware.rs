//! API middleware

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::AppState;
use domain_merchant::Merchant;

/// Authentication middleware
///
/// Resolves the `X-Api-Key` / `X-Api-Secret` header pair to a merchant and
/// attaches it to request extensions. Missing headers, unknown
/// credentials, a deactivated merchant, and a lookup failure all produce
/// the same 401 body.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let api_key = header_value(&request, "x-api-key");
    let api_secret = header_value(&request, "x-api-secret");

    let (api_key, api_secret) = match (api_key, api_secret) {
        (Some(key), Some(secret)) => (key, secret),
        _ => {
            warn!("authentication attempt with missing credential headers");
            return Err(ApiError::Authentication);
        }
    };

    let merchant = state
        .merchants
        .find_by_credentials(&api_key, &api_secret)
        .await
        .map_err(|e| {
            warn!(error = %e, "credential lookup failed");
            ApiError::Authentication
        })?
        .ok_or(ApiError::Authentication)?;

    merchant
        .verify_credentials(&api_key, &api_secret)
        .map_err(|_| ApiError::Authentication)?;

    request.extensions_mut().insert(merchant);
    Ok(next.run(request).await)
}

fn header_value(request: &Request<Body>, name: &str) -> Option<String> {
    request
        .headers()
        .get(name)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
}

/// Audit logging middleware
///
/// Logs every API request with the resolved merchant, if any.
pub async fn audit_middleware(
    State(_state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let merchant = request
        .extensions()
        .get::<Merchant>()
        .map(|m| m.email.clone())
        .unwrap_or_else(|| "anonymous".to_string());

    let start = Utc::now();

    let response = next.run(request).await;

    let duration = Utc::now() - start;
    let status = response.status();

    info!(
        method = %method,
        uri = %uri,
        merchant = %merchant,
        status = %status.as_u16(),
        duration_ms = duration.num_milliseconds(),
        "API request"
    );

    response
}
