//! Configuration module for environment variable parsing.
//!
//! All settings are read once at startup and shared through `AppState`.

use std::env;
use tracing::warn;

/// Invitation endpoint used when `INVITE_API_URL` is not set.
pub const DEFAULT_INVITE_API_URL: &str = "https://api.orderhook.io/v1/invitations";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    /// Shared secret for order webhook HMAC verification
    pub webhook_secret: Option<String>,

    /// Downstream endpoint receiving customer invitations
    pub invite_api_url: String,

    /// Refuse to start when no webhook secret is configured
    pub require_webhook_secret: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Config {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),

            webhook_secret: env::var("SHOPIFY_WEBHOOK_SECRET").ok(),

            invite_api_url: env::var("INVITE_API_URL")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_INVITE_API_URL.to_string()),

            require_webhook_secret: parse_bool("REQUIRE_WEBHOOK_SECRET", false),
        }
    }

    /// Whether a usable webhook secret is present.
    pub fn has_webhook_secret(&self) -> bool {
        crate::web::signature::is_signature_verification_enabled(&self.webhook_secret)
    }
}

/// Parse a boolean flag such as "true", "1", "yes" or "on".
fn parse_bool(name: &str, default: bool) -> bool {
    let raw = match env::var(name) {
        Ok(v) => v,
        Err(_) => return default,
    };

    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => {
            warn!(env_var = name, value = %raw, "Invalid boolean value, using default");
            default
        }
    }
}
