//! HTTP API Layer
//!
//! REST surface of the gateway using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: one module per resource (health, orders, payments,
//!   merchants)
//! - **Middleware**: API-key authentication and request audit logging
//! - **DTOs**: request/response types with method-specific shaping
//! - **Error Handling**: a single `{"error": {code, description}}`
//!   envelope
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, config::GatewayConfig};
//!
//! let app = create_router(pool, GatewayConfig::from_env()?);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::handlers::{health, merchants, orders, payments};
use crate::middleware::{audit_middleware, auth_middleware};
use domain_payment::{FixedSettlement, PaymentEngine, RandomSettlement, SettlementPolicy};
use infra_db::{MerchantRepository, OrderRepository, PaymentRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: GatewayConfig,
    pub merchants: MerchantRepository,
    pub orders: OrderRepository,
    pub payments: PaymentRepository,
    pub engine: Arc<PaymentEngine>,
}

impl AppState {
    /// Builds the state, wiring the settlement policy the configuration
    /// asks for into the payment engine.
    pub fn new(pool: PgPool, config: GatewayConfig) -> Self {
        let merchants = MerchantRepository::new(pool.clone());
        let orders = OrderRepository::new(pool.clone());
        let payments = PaymentRepository::new(pool.clone());

        let policy: Arc<dyn SettlementPolicy> = if config.test_mode {
            Arc::new(FixedSettlement {
                outcome: config.test_payment_success,
                delay: Duration::from_millis(config.test_processing_delay_ms),
            })
        } else {
            Arc::new(RandomSettlement::new(
                config.upi_success_rate,
                config.card_success_rate,
            ))
        };
        let engine = Arc::new(PaymentEngine::new(Arc::new(payments.clone()), policy));

        Self {
            pool,
            config,
            merchants,
            orders,
            payments,
            engine,
        }
    }
}

/// Creates the main API router
pub fn create_router(pool: PgPool, config: GatewayConfig) -> Router {
    let state = AppState::new(pool, config);
    router_with_state(state)
}

/// Router construction from pre-built state, used directly by tests
pub fn router_with_state(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/test/merchant", get(merchants::get_test_merchant))
        .route("/orders/:order_id/public", get(orders::get_order_public))
        .route("/payments/public", post(payments::create_payment_public))
        .route(
            "/payments/:payment_id/public",
            get(payments::get_payment_public),
        )
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            audit_middleware,
        ));

    // Merchant-scoped routes. Auth is the outer layer so the audit log
    // sees the resolved merchant.
    let merchant_routes = Router::new()
        .route("/orders", post(orders::create_order))
        .route("/orders/:order_id", get(orders::get_order))
        .route("/payments", post(payments::create_payment))
        .route("/payments", get(payments::list_payments))
        .route("/payments/:payment_id", get(payments::get_payment))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            audit_middleware,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let api_routes = Router::new().merge(public_routes).merge(merchant_routes);

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
