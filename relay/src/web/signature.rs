//! Order webhook signature verification.
//!
//! The storefront signs each webhook with HMAC-SHA256 over the raw request
//! body, keyed by the shared app secret, and sends the base64 digest in the
//! `X-Shopify-Hmac-Sha256` header.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::warn;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the base64 HMAC digest.
pub const SIGNATURE_HEADER: &str = "x-shopify-hmac-sha256";

/// Verify an order webhook signature.
///
/// The digest must be computed over the body exactly as received; parsing
/// and re-serializing the JSON would change the bytes and break the check.
///
/// # Arguments
///
/// * `raw_body` - The untouched request body
/// * `provided_signature` - The header value sent by the storefront
/// * `secret` - The shared webhook secret, if configured
///
/// # Returns
///
/// `true` if the signature matches, or if no secret is configured.
pub fn verify_webhook_signature(
    raw_body: &[u8],
    provided_signature: &str,
    secret: Option<&str>,
) -> bool {
    let secret = match secret.filter(|s| !s.is_empty()) {
        Some(s) => s,
        None => {
            warn!(
                body_length = raw_body.len(),
                "webhook_signature_verification_disabled"
            );
            return true;
        }
    };

    if provided_signature.is_empty() {
        warn!(body_length = raw_body.len(), "webhook_signature_missing");
        return false;
    }

    let expected_signature = match compute_webhook_signature(secret, raw_body) {
        Some(sig) => sig,
        None => return false,
    };

    let valid = constant_time_compare(&expected_signature, provided_signature);

    if !valid {
        warn!(
            expected_length = expected_signature.len(),
            actual_length = provided_signature.len(),
            body_length = raw_body.len(),
            "webhook_signature_mismatch"
        );
    }

    valid
}

/// Compute the base64 HMAC-SHA256 digest of `body` under `secret`.
///
/// Returns `None` only if the HMAC primitive rejects the key.
pub fn compute_webhook_signature(secret: &str, body: &[u8]) -> Option<String> {
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => {
            warn!("webhook_signature_invalid_key");
            return None;
        }
    };

    mac.update(body);

    Some(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}

/// Check if webhook signature verification is enabled.
pub fn is_signature_verification_enabled(secret: &Option<String>) -> bool {
    secret
        .as_ref()
        .map(|k| !k.is_empty())
        .unwrap_or(false)
}
