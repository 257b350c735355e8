//! Error type for the order webhook endpoint.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::invite::ForwardError;
use crate::order::ValidationError;

/// Every way an order webhook request can fail.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("invalid webhook signature")]
    Unauthorized,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid order payload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Upstream(#[from] ForwardError),
}

impl WebhookError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::Unauthorized => StatusCode::UNAUTHORIZED,
            WebhookError::Validation(_) => StatusCode::BAD_REQUEST,
            WebhookError::Parse(_) | WebhookError::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let message = match &self {
            WebhookError::Unauthorized => "Unauthorized".to_string(),
            WebhookError::Validation(e) => e.to_string(),
            WebhookError::Parse(_) => "Error processing webhook".to_string(),
            WebhookError::Upstream(e) => format!("Error processing webhook: {}", e),
        };

        (self.status_code(), message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            WebhookError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            WebhookError::from(ValidationError::MissingRequiredField { field: "email" })
                .status_code(),
            StatusCode::BAD_REQUEST
        );

        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(
            WebhookError::from(parse_err).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let upstream = ForwardError::UpstreamRejected {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: String::new(),
        };
        assert_eq!(
            WebhookError::from(upstream).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_into_response_status() {
        let response = WebhookError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
