//! HTTP endpoint handlers.
//!
//! The order webhook runs the whole pipeline inline:
//! 1. Verify the HMAC signature over the raw body
//! 2. Parse the order JSON
//! 3. Extract the customer
//! 4. Forward it to the invitation API
//!
//! Nothing is queued or retried. A failure at any step ends the request.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::invite::Forwarder;
use crate::order::{extract_customer, missing_required_fields, OrderRecord};
use crate::web::error::WebhookError;
use crate::web::signature::{verify_webhook_signature, SIGNATURE_HEADER};
use crate::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub forwarder: Forwarder,
}

impl AppState {
    pub fn new(config: Config, forwarder: Forwarder) -> Self {
        Self {
            config: Arc::new(config),
            forwarder,
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

// =============================================================================
// Order Created Webhook
// =============================================================================

/// Order-created webhook endpoint.
///
/// Responds 401 on a bad signature, 400 when a required customer field is
/// missing, 500 on a malformed payload or downstream failure, and 200 once
/// the invitation API accepts the customer.
pub async fn order_created_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, &'static str), WebhookError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    info!(
        body_length = body.len(),
        has_signature = !signature.is_empty(),
        "order_webhook_received"
    );

    if !verify_webhook_signature(&body, signature, state.config.webhook_secret.as_deref()) {
        warn!(body_length = body.len(), "order_webhook_unauthorized");
        return Err(WebhookError::Unauthorized);
    }

    let order: OrderRecord = serde_json::from_slice(&body).map_err(|e| {
        error!(
            error = %e,
            body_length = body.len(),
            "order_webhook_parse_failed"
        );
        WebhookError::Parse(e)
    })?;

    let customer = extract_customer(&order).map_err(|e| {
        warn!(
            order_id = %order.id_label(),
            order_number = %order.order_number_label(),
            missing_fields = ?missing_required_fields(&order),
            error = %e,
            "order_webhook_customer_invalid"
        );
        WebhookError::Validation(e)
    })?;

    state.forwarder.forward(&customer).await.map_err(|e| {
        error!(
            order_id = %order.id_label(),
            order_number = %order.order_number_label(),
            error = %e,
            "order_webhook_forward_failed"
        );
        WebhookError::Upstream(e)
    })?;

    info!(
        order_id = %order.id_label(),
        order_number = %order.order_number_label(),
        "order_webhook_processed"
    );

    Ok((StatusCode::OK, "Webhook processed successfully"))
}

// =============================================================================
// Manual Test Trigger
// =============================================================================

/// Response for the manual test trigger.
#[derive(Debug, Serialize)]
pub struct TestWebhookResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Send the built-in sample customer to the invitation API.
///
/// Skips signature verification; the request body is ignored.
pub async fn test_webhook(State(state): State<AppState>) -> impl IntoResponse {
    info!("test_webhook_received");

    let order = OrderRecord::sample();

    let result = match extract_customer(&order) {
        Ok(customer) => state
            .forwarder
            .forward(&customer)
            .await
            .map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };

    match result {
        Ok(data) => {
            info!("test_webhook_sent");
            (
                StatusCode::OK,
                Json(TestWebhookResponse {
                    success: true,
                    message: Some("Test webhook sent successfully"),
                    data: Some(data),
                    error: None,
                }),
            )
        }
        Err(e) => {
            error!(error = %e, "test_webhook_failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(TestWebhookResponse {
                    success: false,
                    message: None,
                    data: None,
                    error: Some(e),
                }),
            )
        }
    }
}
