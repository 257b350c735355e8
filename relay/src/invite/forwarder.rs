//! HTTP forwarder for the invitation API.
//!
//! Sends one POST per customer. Failures are returned to the caller and
//! never retried.

use std::sync::Arc;

use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::order::CustomerRecord;

/// Failure while forwarding a customer downstream.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The invitation API answered with a non-2xx status.
    #[error("invitation API rejected request with status {status}: {body}")]
    UpstreamRejected { status: StatusCode, body: String },

    /// The request never produced a usable response.
    #[error("invitation API request failed: {cause}")]
    TransportFailure {
        #[source]
        cause: reqwest::Error,
    },
}

/// Shared handle to the invitation API.
///
/// Cloning is cheap; all clones share one connection pool.
#[derive(Clone)]
pub struct Forwarder {
    inner: Arc<ForwarderInner>,
}

struct ForwarderInner {
    client: Client,
    url: String,
}

impl Forwarder {
    /// Create a forwarder posting to `url`.
    pub fn new(url: String) -> Self {
        Self {
            inner: Arc::new(ForwarderInner {
                client: Client::new(),
                url,
            }),
        }
    }

    /// The downstream endpoint.
    pub fn url(&self) -> &str {
        &self.inner.url
    }

    /// POST a customer to the invitation API.
    ///
    /// On success returns the response body, parsed as JSON when possible,
    /// otherwise as a JSON string. An empty body yields `Value::Null`.
    pub async fn forward(&self, customer: &CustomerRecord) -> Result<Value, ForwardError> {
        info!(
            url = %self.inner.url,
            email = %customer.email,
            has_phone = customer.phone.is_some(),
            "invite_forward_start"
        );

        let response = self
            .inner
            .client
            .post(&self.inner.url)
            .header(CONTENT_TYPE, "application/json")
            .json(customer)
            .send()
            .await
            .map_err(|e| {
                error!(url = %self.inner.url, error = %e, "invite_forward_transport_error");
                ForwardError::TransportFailure { cause: e }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!(
                url = %self.inner.url,
                status_code = status.as_u16(),
                error = %e,
                "invite_forward_body_read_error"
            );
            ForwardError::TransportFailure { cause: e }
        })?;

        if !status.is_success() {
            warn!(
                url = %self.inner.url,
                status_code = status.as_u16(),
                body_preview = %preview(&body),
                "invite_forward_rejected"
            );
            return Err(ForwardError::UpstreamRejected { status, body });
        }

        info!(
            url = %self.inner.url,
            status_code = status.as_u16(),
            body_length = body.len(),
            "invite_forward_complete"
        );

        Ok(parse_body(body))
    }
}

/// Interpret a successful response body.
fn parse_body(body: String) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }

    serde_json::from_str(&body).unwrap_or(Value::String(body))
}

/// First 200 characters of a body, for logs.
fn preview(body: &str) -> &str {
    match body.char_indices().nth(200) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn jane() -> CustomerRecord {
        CustomerRecord {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@x.com".to_string(),
            phone: None,
        }
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(String::new()), Value::Null);
        assert_eq!(parse_body("  \n".to_string()), Value::Null);
        assert_eq!(
            parse_body(r#"{"id":"inv_1"}"#.to_string()),
            serde_json::json!({"id": "inv_1"})
        );
        assert_eq!(
            parse_body("Created".to_string()),
            Value::String("Created".to_string())
        );
    }

    #[test]
    fn test_preview_truncates() {
        let long = "x".repeat(500);
        assert_eq!(preview(&long).len(), 200);
        assert_eq!(preview("short"), "short");
    }

    #[tokio::test]
    async fn test_forward_posts_json_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/invitations"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({
                "first_name": "Jane",
                "last_name": "Doe",
                "email": "jane@x.com"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": "inv_1",
                "status": "sent"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let forwarder = Forwarder::new(format!("{}/invitations", server.uri()));
        let result = forwarder.forward(&jane()).await.unwrap();

        assert_eq!(result, serde_json::json!({"id": "inv_1", "status": "sent"}));
    }

    #[tokio::test]
    async fn test_forward_upstream_rejected() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/invitations"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .expect(1)
            .mount(&server)
            .await;

        let forwarder = Forwarder::new(format!("{}/invitations", server.uri()));
        let err = forwarder.forward(&jane()).await.unwrap_err();

        match err {
            ForwardError::UpstreamRejected { status, body } => {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
                assert_eq!(body, "maintenance");
            }
            other => panic!("Expected UpstreamRejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_forward_transport_failure() {
        // Nothing listens on port 1
        let forwarder = Forwarder::new("http://127.0.0.1:1/invitations".to_string());
        let err = forwarder.forward(&jane()).await.unwrap_err();

        assert!(matches!(err, ForwardError::TransportFailure { .. }));
    }

    #[test]
    fn test_forwarder_clone_shares_inner() {
        let forwarder = Forwarder::new("http://localhost/invitations".to_string());
        let clone = forwarder.clone();

        assert!(Arc::ptr_eq(&forwarder.inner, &clone.inner));
        assert_eq!(clone.url(), "http://localhost/invitations");
    }
}
