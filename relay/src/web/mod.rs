//! Web server module for the order webhook relay.
//!
//! This module provides:
//! - The order-created webhook, verified against the shared secret
//! - A manual trigger that sends a sample customer downstream
//! - A health check

pub mod error;
pub mod handlers;
pub mod signature;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use error::WebhookError;
pub use handlers::{
    health, order_created_webhook, test_webhook, AppState, HealthResponse, TestWebhookResponse,
};
pub use signature::{
    compute_webhook_signature, is_signature_verification_enabled, verify_webhook_signature,
    SIGNATURE_HEADER,
};

/// Route receiving order-created webhooks.
pub const ORDER_CREATED_PATH: &str = "/webhook/shopify/order/created";

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(ORDER_CREATED_PATH, post(order_created_webhook))
        .route("/test-webhook", post(test_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
